use axum::extract::OriginalUri;
use axum::http::StatusCode;

use crate::app::errors;

pub mod products;

/// Fallback for paths no route matches, so they get the usual error body.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        format!("no route for {}", uri.path()),
        uri.path(),
    )
}
