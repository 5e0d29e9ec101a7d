//! Comparison handlers: list, create, read, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{AppJson, AppPath, AppQuery};
use crate::model::{ComparisonCreate, ComparisonDto, ListParams};
use crate::response::MessageBody;
use crate::service::ComparisonService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// List comparisons.
#[utoipa::path(
    get,
    path = "/comparisons",
    tag = "Comparisons",
    params(ListParams),
    responses(
        (status = 200, description = "Page of comparisons ordered by id", body = [ComparisonDto]),
        (status = 400, description = "Invalid skip or limit", body = ErrorBody),
    ),
)]
pub async fn list_comparisons(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ListParams>,
) -> Result<Json<Vec<ComparisonDto>>, AppError> {
    let rows = ComparisonService::list(&state.pool, params).await?;
    Ok(Json(rows))
}

/// Create a comparison and link its products in one transaction.
#[utoipa::path(
    post,
    path = "/comparisons",
    tag = "Comparisons",
    request_body = ComparisonCreate,
    responses(
        (status = 201, description = "Created comparison with expanded product links", body = ComparisonDto),
        (status = 422, description = "Body is not a valid comparison", body = ErrorBody),
        (status = 500, description = "Storage rejected the write; nothing was persisted", body = ErrorBody),
    ),
)]
pub async fn create_comparison(
    State(state): State<AppState>,
    AppJson(body): AppJson<ComparisonCreate>,
) -> Result<(StatusCode, Json<ComparisonDto>), AppError> {
    let created = ComparisonService::create(&state.pool, &body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one comparison.
#[utoipa::path(
    get,
    path = "/comparisons/{id}",
    tag = "Comparisons",
    params(("id" = i32, Path, description = "Comparison id")),
    responses(
        (status = 200, description = "Comparison with expanded product links", body = ComparisonDto),
        (status = 404, description = "Comparison not found", body = ErrorBody),
    ),
)]
pub async fn get_comparison(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<ComparisonDto>, AppError> {
    let comparison = ComparisonService::get(&state.pool, id)
        .await?
        .ok_or_else(AppError::comparison_not_found)?;
    Ok(Json(comparison))
}

/// Delete a comparison and its product links.
#[utoipa::path(
    delete,
    path = "/comparisons/{id}",
    tag = "Comparisons",
    params(("id" = i32, Path, description = "Comparison id")),
    responses(
        (status = 200, description = "Comparison deleted", body = MessageBody),
        (status = 404, description = "Comparison not found", body = ErrorBody),
    ),
)]
pub async fn delete_comparison(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    if !ComparisonService::delete(&state.pool, id).await? {
        return Err(AppError::comparison_not_found());
    }
    Ok(Json(MessageBody::new("Comparison deleted successfully")))
}
