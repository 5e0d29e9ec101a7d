//! Router assembly.

mod catalog;
mod common;
mod openapi;

pub use catalog::{comparison_routes, product_routes};
pub use common::common_routes;
pub use openapi::{openapi_routes, ApiDoc, OPENAPI_PATH};

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: resource routes, common routes, OpenAPI JSON, request tracing, body limit.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(comparison_routes())
        .merge(product_routes())
        .merge(openapi_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
