//! Product Compare: REST backend for products and saved product comparisons.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, SeedError};
pub use routes::{app_router, ApiDoc};
pub use seed::SeedReport;
pub use service::{ComparisonService, ProductService, ProductTypeService};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
