use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, OriginalUri, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use catalog_core::ProductId;
use catalog_products::{Category, ProductInput, ProductOutput, ServiceError, StockInput};

use crate::app::errors::{self, ErrorBody};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/category/:category", get(list_products_by_category))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", patch(update_stock))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "Every product, oldest first", body = [ProductOutput]),
        (status = 500, description = "Storage failure", body = ErrorBody),
    )
)]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
) -> axum::response::Response {
    let products = services.products();
    match products.get_all().await {
        Ok(items) => {
            let items = items
                .iter()
                .map(|p| products.entity_to_output(p))
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

#[utoipa::path(
    get,
    path = "/products/category/{category}",
    tag = "products",
    params(
        ("category" = Category, Path, description = "Category tag, e.g. ELECTRONICA"),
    ),
    responses(
        (status = 200, description = "Products in the category", body = [ProductOutput]),
        (status = 400, description = "Unknown category tag", body = ErrorBody),
    )
)]
pub async fn list_products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(category): Path<String>,
) -> axum::response::Response {
    let category: Category = match category.parse() {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e, uri.path()),
    };

    let products = services.products();
    match products.get_by_category(category).await {
        Ok(items) => {
            let items = items
                .iter()
                .map(|p| products.entity_to_output(p))
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product id (UUID)"),
    ),
    responses(
        (status = 200, description = "The product", body = ProductOutput),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
    )
)]
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e, uri.path()),
    };

    let products = services.products();
    match products.get_by_id(id).await {
        Ok(Some(p)) => (StatusCode::OK, Json(products.entity_to_output(&p))).into_response(),
        Ok(None) => errors::service_error_to_response(ServiceError::not_found(id), uri.path()),
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductOutput),
        (status = 400, description = "Malformed body or invalid fields", body = ErrorBody),
    )
)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> axum::response::Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return errors::json_rejection_to_response(rejection, uri.path()),
    };

    let products = services.products();
    match products.create(input).await {
        Ok(p) => (StatusCode::CREATED, Json(products.entity_to_output(&p))).into_response(),
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

/// Full update. The body is validated as a whole (400 before any lookup), but
/// only name and description are applied.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product id (UUID)"),
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductOutput),
        (status = 400, description = "Malformed id or body, or invalid fields", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
    )
)]
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e, uri.path()),
    };
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return errors::json_rejection_to_response(rejection, uri.path()),
    };
    let valid = match input.validate() {
        Ok(v) => v,
        Err(violations) => {
            return errors::service_error_to_response(ServiceError::Validation(violations), uri.path());
        }
    };

    let products = services.products();
    match products.update_full(id, valid).await {
        Ok(p) => (StatusCode::OK, Json(products.entity_to_output(&p))).into_response(),
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

#[utoipa::path(
    patch,
    path = "/products/{id}/stock",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product id (UUID)"),
    ),
    request_body = StockInput,
    responses(
        (status = 200, description = "Stock updated", body = ProductOutput),
        (status = 400, description = "Stock null or negative", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
    )
)]
pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: Result<Json<StockInput>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e, uri.path()),
    };
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => return errors::json_rejection_to_response(rejection, uri.path()),
    };
    let stock = match input.validate() {
        Ok(s) => s,
        Err(violations) => {
            return errors::service_error_to_response(ServiceError::Validation(violations), uri.path());
        }
    };

    let products = services.products();
    match products.update_stock(id, stock).await {
        Ok(p) => (StatusCode::OK, Json(products.entity_to_output(&p))).into_response(),
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(
        ("id" = String, Path, description = "Product id (UUID)"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No product with this id", body = ErrorBody),
    )
)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e, uri.path()),
    };

    match services.products().delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e, uri.path()),
    }
}
