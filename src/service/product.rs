//! Products and the metadata rows they own.

use crate::error::AppError;
use crate::model::{Product, ProductCreate, ProductDetail, ProductListParams, ProductMetadata};
use sqlx::PgPool;

const PRODUCT_COLUMNS: &str = "id, product_type_id, user_id, name, image_base64, brand, score";
const METADATA_COLUMNS: &str = "id, product_id, attribute, value, score";

pub struct ProductService;

impl ProductService {
    /// Products ordered by id with optional exact-match filters on type and owner.
    pub async fn list(pool: &PgPool, params: &ProductListParams) -> Result<Vec<Product>, AppError> {
        let (limit, offset) = params.page().bounds();
        let sql = format!(
            r#"
            SELECT {} FROM products
            WHERE ($1::INTEGER IS NULL OR product_type_id = $1)
              AND ($2::TEXT IS NULL OR user_id = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, ?params, "query");
        let rows: Vec<Product> = sqlx::query_as(&sql)
            .bind(params.product_type_id)
            .bind(params.user_id.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<ProductDetail>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row: Option<Product> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
        let Some(product) = row else {
            return Ok(None);
        };
        let sql = format!(
            "SELECT {} FROM product_metadata WHERE product_id = $1 ORDER BY id",
            METADATA_COLUMNS
        );
        let metadata: Vec<ProductMetadata> = sqlx::query_as(&sql).bind(id).fetch_all(pool).await?;
        Ok(Some(ProductDetail { product, metadata }))
    }

    /// Insert the product and its metadata rows in one transaction.
    pub async fn create(pool: &PgPool, body: &ProductCreate) -> Result<ProductDetail, AppError> {
        let mut tx = pool.begin().await?;
        let product: Product = sqlx::query_as(&format!(
            r#"
            INSERT INTO products (product_type_id, user_id, name, image_base64, brand, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(body.product_type_id)
        .bind(&body.user_id)
        .bind(&body.name)
        .bind(body.image_base64.as_deref())
        .bind(body.brand.as_deref())
        .bind(body.score)
        .fetch_one(&mut *tx)
        .await?;

        let insert_metadata = format!(
            "INSERT INTO product_metadata (product_id, attribute, value, score) VALUES ($1, $2, $3, $4) RETURNING {}",
            METADATA_COLUMNS
        );
        let mut metadata = Vec::with_capacity(body.metadata.len());
        for m in &body.metadata {
            let row: ProductMetadata = sqlx::query_as(&insert_metadata)
                .bind(product.id)
                .bind(&m.attribute)
                .bind(&m.value)
                .bind(m.score)
                .fetch_one(&mut *tx)
                .await?;
            metadata.push(row);
        }
        tx.commit().await?;
        tracing::info!(id = product.id, metadata = metadata.len(), "product created");
        Ok(ProductDetail { product, metadata })
    }

    /// Delete metadata rows then the product. Returns false when no product matched.
    /// A product still linked by a comparison is a conflict.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM product_metadata WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                let err = AppError::from(e);
                if err.is_foreign_key_violation() {
                    AppError::Conflict(format!("product {} is linked by a comparison", id))
                } else {
                    err
                }
            })?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::info!(id, "product deleted");
        Ok(true)
    }
}
