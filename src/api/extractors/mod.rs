/*
 * Responsibility
 * - handler で共通利用する extractor
 * - 失敗時は AppError (JSON error body) に変換
 */
pub mod json;
pub mod post_id;

pub use json::JsonBody;
pub use post_id::PostId;
