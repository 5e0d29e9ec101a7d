//! Request extractors that turn axum rejections into `AppError` bodies.

pub mod json;
pub mod params;

pub use json::AppJson;
pub use params::{AppPath, AppQuery};
