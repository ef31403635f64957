use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use catalog_core::DomainError;
use catalog_products::ServiceError;

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = 404)]
    pub status: u16,
    /// Canonical reason phrase of `status` (e.g. "Not Found").
    #[schema(example = "Not Found")]
    pub error: String,
    #[schema(example = "product not found with id: 01929f3e-7c1a-7d4e-9b2a-5f0c3d8e1a24")]
    pub message: String,
    /// Request path the error answers.
    #[schema(example = "/products/01929f3e-7c1a-7d4e-9b2a-5f0c3d8e1a24")]
    pub path: String,
}

pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
    path: &str,
) -> axum::response::Response {
    let body = ErrorBody {
        status: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Unknown").to_string(),
        message: message.into(),
        path: path.to_string(),
    };
    (status, axum::Json(body)).into_response()
}

pub fn service_error_to_response(err: ServiceError, path: &str) -> axum::response::Response {
    match err {
        ServiceError::NotFound { message, .. } => json_error(StatusCode::NOT_FOUND, message, path),
        ServiceError::Validation(violations) => {
            json_error(StatusCode::BAD_REQUEST, violations.to_string(), path)
        }
        ServiceError::Repository(e) => {
            tracing::error!(error = %e, %path, "repository failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("unexpected error: {e}"),
                path,
            )
        }
    }
}

/// Malformed ids and unknown category tags in the path.
pub fn domain_error_to_response(err: DomainError, path: &str) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, err.to_string(), path)
}

/// Bodies that are not JSON or do not fit the input shape. Always 400, even
/// where axum would answer 415/422.
pub fn json_rejection_to_response(rejection: JsonRejection, path: &str) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, rejection.body_text(), path)
}
