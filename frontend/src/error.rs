/*
 * Responsibility
 * - ページ描画の PageError 定義
 * - template 失敗はログに残し 500 を返す
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
