//! Request extractors

use axum::extract::FromRequest;

use crate::api::error::ApiError;

/// JSON body whose rejections answer with the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
