//! JSON body extractor whose rejection is an [`AppError`], so malformed bodies get
//! the same error shape as every other failure.
use axum::{Json as AxumJson, extract::FromRequest};

use crate::error::AppError;

#[derive(FromRequest, Debug, Clone, Copy, Default)]
#[from_request(via(AxumJson), rejection(AppError))]
pub struct JsonBody<T>(pub T);
