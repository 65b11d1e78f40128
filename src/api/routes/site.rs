//! Site Route
//!
//! - GET / - The portal's single-page site

use axum::{http::header, response::IntoResponse};

use crate::api::frontend::INDEX_HTML;

/// GET /
pub async fn index() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache")],
        axum::response::Html(INDEX_HTML),
    )
}
