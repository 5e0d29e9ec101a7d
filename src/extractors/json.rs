//! JSON body extractor with structured error responses.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// `Json<T>` wrapper: malformed or mistyped bodies become `AppError::Validation`.
/// Other rejections (body too large, missing content type) keep their status.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e.body_text(), "rejected json body");
            match e {
                JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                    AppError::Validation(e.body_text())
                }
                other => AppError::Rejected(other.status(), other.body_text()),
            }
        })?;
        Ok(AppJson(value))
    }
}
