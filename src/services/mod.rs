/*
 * Responsibility
 * - handler から呼ばれる post の純粋ロジック (I/O なし)
 */
pub mod post_date;
pub mod post_query;
