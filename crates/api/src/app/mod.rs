use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, routing::get, Router};
use tower::ServiceBuilder;

use crate::config::ApiConfig;

pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the application router from configuration.
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = match (config.use_persistent_stores, config.database_url.as_deref()) {
        (true, Some(url)) => {
            tracing::info!("using Postgres product repository");
            AppServices::persistent(url).await?
        }
        _ => {
            tracing::info!("using in-memory product repository");
            AppServices::in_memory()
        }
    };

    Ok(router(Arc::new(services)))
}

/// Router over already-built services (same tree in prod and tests).
pub fn router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi::openapi_json))
        .nest("/products", routes::products::router())
        .fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(crate::middleware::trace_requests))
                .layer(Extension(services)),
        )
}

async fn health() -> StatusCode {
    StatusCode::OK
}
