//! Product type seeding from the packaged YAML resource.
//!
//! Every entry is normalized before the database is touched, so a malformed
//! `metadata_schema` aborts the load without writing anything. Existing ids are
//! skipped, never updated, and the whole list commits in one transaction.

use crate::error::SeedError;
use crate::model::ProductType;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;
use std::path::Path;

/// Seed list compiled into the binary.
pub const BUNDLED_PRODUCT_TYPES: &str = include_str!("../resources/products.yml");

#[derive(Debug, Deserialize)]
struct SeedFile {
    product_types: Vec<ProductTypeSeed>,
}

#[derive(Debug, Deserialize)]
struct ProductTypeSeed {
    id: i32,
    name: String,
    description: String,
    metadata_schema: Value,
}

impl ProductTypeSeed {
    fn normalize(self) -> Result<ProductType, SeedError> {
        let metadata_schema = match self.metadata_schema {
            Value::String(encoded) => serde_json::from_str(&encoded)
                .map_err(|source| SeedError::MetadataSchema { id: self.id, source })?,
            doc => doc,
        };
        Ok(ProductType {
            id: self.id,
            name: self.name,
            description: self.description,
            metadata_schema,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: u64,
    pub skipped: u64,
}

/// Parse and normalize a seed document.
pub fn parse_product_types(yaml: &str) -> Result<Vec<ProductType>, SeedError> {
    let file: SeedFile = serde_yaml::from_str(yaml)?;
    file.product_types
        .into_iter()
        .map(ProductTypeSeed::normalize)
        .collect()
}

/// Read product types from `path`, or from the bundled resource when `None`.
pub async fn read_product_types(path: Option<&Path>) -> Result<Vec<ProductType>, SeedError> {
    match path {
        Some(p) => {
            let yaml = tokio::fs::read_to_string(p).await.map_err(|source| SeedError::Io {
                path: p.display().to_string(),
                source,
            })?;
            parse_product_types(&yaml)
        }
        None => parse_product_types(BUNDLED_PRODUCT_TYPES),
    }
}

/// Insert every product type whose id is not yet present. One commit for the whole list.
pub async fn init_product_types(pool: &PgPool, product_types: &[ProductType]) -> Result<SeedReport, SeedError> {
    tracing::info!(count = product_types.len(), "initializing product types");
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;
    for pt in product_types {
        let result = sqlx::query(
            r#"
            INSERT INTO product_types (id, name, description, metadata_schema)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(pt.id)
        .bind(&pt.name)
        .bind(&pt.description)
        .bind(&pt.metadata_schema)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id = pt.id, "skipping product type, already exists");
            report.skipped += 1;
        } else {
            report.inserted += 1;
        }
    }
    tx.commit().await?;
    tracing::info!(inserted = report.inserted, skipped = report.skipped, "product types initialized");
    Ok(report)
}

/// Startup entry point: read, normalize, then insert missing product types.
pub async fn load(pool: &PgPool, path: Option<&Path>) -> Result<SeedReport, SeedError> {
    let product_types = read_product_types(path).await?;
    init_product_types(pool, &product_types).await
}
