//! Read-only access to product types. Rows are only written by the seed loader.

use crate::error::AppError;
use crate::model::ProductType;
use sqlx::PgPool;

const PRODUCT_TYPE_COLUMNS: &str = "id, name, description, metadata_schema";

pub struct ProductTypeService;

impl ProductTypeService {
    pub async fn list(pool: &PgPool) -> Result<Vec<ProductType>, AppError> {
        let sql = format!("SELECT {} FROM product_types ORDER BY id", PRODUCT_TYPE_COLUMNS);
        let rows: Vec<ProductType> = sqlx::query_as(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<ProductType>, AppError> {
        let sql = format!("SELECT {} FROM product_types WHERE id = $1", PRODUCT_TYPE_COLUMNS);
        let row: Option<ProductType> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}
