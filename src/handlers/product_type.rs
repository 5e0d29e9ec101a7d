//! Read-only product type handlers. Rows come from the startup seed.

use crate::error::{AppError, ErrorBody};
use crate::extractors::AppPath;
use crate::model::ProductType;
use crate::service::ProductTypeService;
use crate::state::AppState;
use axum::{extract::State, Json};

#[utoipa::path(
    get,
    path = "/product-types",
    tag = "Product Types",
    responses((status = 200, description = "All product types ordered by id", body = [ProductType])),
)]
pub async fn list_product_types(State(state): State<AppState>) -> Result<Json<Vec<ProductType>>, AppError> {
    Ok(Json(ProductTypeService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/product-types/{id}",
    tag = "Product Types",
    params(("id" = i32, Path, description = "Product type id")),
    responses(
        (status = 200, description = "Product type", body = ProductType),
        (status = 404, description = "Product type not found", body = ErrorBody),
    ),
)]
pub async fn get_product_type(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ProductType>, AppError> {
    let product_type = ProductTypeService::get(&state.pool, id)
        .await?
        .ok_or_else(AppError::product_type_not_found)?;
    Ok(Json(product_type))
}
