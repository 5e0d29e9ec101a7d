//! Resource routes: comparisons, products, product types.
//!
//! Collections answer both with and without a trailing slash (`/comparisons/`
//! is the canonical URL for existing clients).

use crate::handlers::comparison::{create_comparison, delete_comparison, get_comparison, list_comparisons};
use crate::handlers::product::{create_product, delete_product, get_product, list_products};
use crate::handlers::product_type::{get_product_type, list_product_types};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn comparison_routes() -> Router<AppState> {
    let collection = get(list_comparisons).post(create_comparison);
    Router::new()
        .route("/comparisons", collection.clone())
        .route("/comparisons/", collection)
        .route("/comparisons/:id", get(get_comparison).delete(delete_comparison))
}

pub fn product_routes() -> Router<AppState> {
    let collection = get(list_products).post(create_product);
    Router::new()
        .route("/products", collection.clone())
        .route("/products/", collection)
        .route("/products/:id", get(get_product).delete(delete_product))
        .route("/product-types", get(list_product_types))
        .route("/product-types/", get(list_product_types))
        .route("/product-types/:id", get(get_product_type))
}
