use axum::Json;
use utoipa::OpenApi;

use catalog_products::{Category, ProductInput, ProductOutput, StockInput};

use crate::app::errors::ErrorBody;
use crate::app::routes::products;

/// OpenAPI document for the product routes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product catalog API",
        description = "Create, read, update and delete catalog products."
    ),
    paths(
        products::list_products,
        products::list_products_by_category,
        products::get_product,
        products::create_product,
        products::update_product,
        products::update_stock,
        products::delete_product,
    ),
    components(schemas(ProductInput, StockInput, ProductOutput, Category, ErrorBody)),
    tags((name = "products", description = "Product catalog management"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_every_schema() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];

        for name in ["ProductInput", "StockInput", "ProductOutput", "Category", "ErrorBody"] {
            assert!(schemas.get(name).is_some(), "missing schema {name}");
        }

        let tags = schemas["Category"]["enum"].as_array().unwrap();
        assert_eq!(tags.len(), Category::ALL.len());
        assert!(tags.contains(&serde_json::json!("ELECTRONICA")));
    }
}
