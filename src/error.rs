/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / request validation / JSON rejection を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::dto::posts::PostInputError;
use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl std::fmt::Display) -> Self {
        Self::NotFound {
            message: format!("{resource} not found."),
        }
    }

    // GET/PUT/search on a store with no posts at all
    pub fn empty_collection() -> Self {
        Self::NotFound {
            message: "Data is empty. Please add a post first.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "storage operation failed");
        AppError::Internal
    }
}

impl From<PostInputError> for AppError {
    fn from(e: PostInputError) -> Self {
        let code = match &e {
            PostInputError::Missing(_) => "MISSING_FIELDS",
            PostInputError::InvalidDate => "INVALID_DATE",
            PostInputError::NothingToUpdate => "NOTHING_TO_UPDATE",
        };
        AppError::bad_request(code, e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("INVALID_BODY", e.body_text())
    }
}
