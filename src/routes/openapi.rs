//! OpenAPI document for every resource route.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{comparison, product, product_type};
use crate::model::{
    ComparisonCreate, ComparisonDto, ComparisonProductDto, Product, ProductCreate, ProductDetail, ProductMetadata,
    ProductMetadataCreate, ProductType,
};
use crate::response::MessageBody;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Compare API",
        description = "Products, product types, and side-by-side product comparisons"
    ),
    paths(
        comparison::list_comparisons,
        comparison::create_comparison,
        comparison::get_comparison,
        comparison::delete_comparison,
        product::list_products,
        product::create_product,
        product::get_product,
        product::delete_product,
        product_type::list_product_types,
        product_type::get_product_type,
    ),
    components(schemas(
        ComparisonCreate,
        ComparisonDto,
        ComparisonProductDto,
        Product,
        ProductCreate,
        ProductDetail,
        ProductMetadata,
        ProductMetadataCreate,
        ProductType,
        MessageBody,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "Comparisons", description = "Saved groupings of products"),
        (name = "Products", description = "Products and their metadata"),
        (name = "Product Types", description = "Seeded product categories"),
    ),
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
