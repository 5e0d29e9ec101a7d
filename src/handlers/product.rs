//! Product handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::model::{Product, ProductCreate, ProductDetail, ProductListParams};
use crate::response::MessageBody;
use crate::service::ProductService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Page of products ordered by id", body = [Product]),
        (status = 400, description = "Invalid query", body = ErrorBody),
    ),
)]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProductListParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(ProductService::list(&state.pool, &params).await?))
}

/// Create a product together with its metadata rows.
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = ProductCreate,
    responses(
        (status = 201, description = "Created product", body = ProductDetail),
        (status = 422, description = "Body is not a valid product", body = ErrorBody),
        (status = 500, description = "Storage rejected the write", body = ErrorBody),
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(body): AppJson<ProductCreate>,
) -> Result<(StatusCode, Json<ProductDetail>), AppError> {
    let created = ProductService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with metadata", body = ProductDetail),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ProductDetail>, AppError> {
    let product = ProductService::get(&state.pool, id)
        .await?
        .ok_or_else(AppError::product_not_found)?;
    Ok(Json(product))
}

/// Delete a product and its metadata. Fails with 409 while a comparison links it.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 409, description = "Product is linked by a comparison", body = ErrorBody),
    ),
)]
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    if !ProductService::delete(&state.pool, id).await? {
        return Err(AppError::product_not_found());
    }
    Ok(Json(MessageBody::new("Product deleted successfully")))
}
