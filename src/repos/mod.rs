/*
 * Responsibility
 * - persistence layer (single JSON file)
 */
pub mod error;
pub mod post_repo;
