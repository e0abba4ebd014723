/*
 * Responsibility
 * - Path の `{id}` を受け、全桁数字の正整数だけを PostId に変換する
 * - 失敗時は 400 (INVALID_POST_ID)
 * - delete / update / like で共通利用
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PostId(pub u64);

impl PostId {
    fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse::<u64>().ok().filter(|id| *id > 0).map(Self)
    }
}

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_POST_ID", "invalid post id"))?;

        Self::parse(&raw).ok_or_else(|| {
            AppError::bad_request(
                "INVALID_POST_ID",
                format!("post id must be a positive integer, got {raw:?}"),
            )
        })
    }
}
