//! Comparison aggregate reads and the transactional aggregate writer.

use crate::error::AppError;
use crate::model::{Comparison, ComparisonCreate, ComparisonDto, ComparisonProductDto, LinkedProductRow, ListParams};
use sqlx::PgPool;
use std::collections::HashMap;

const COMPARISON_COLUMNS: &str = "id, title, description, user_id, date_created, product_type_id";

const LINKS_FOR_COMPARISONS: &str = r#"
    SELECT cp.id AS link_id, cp.comparison_id,
           p.id, p.product_type_id, p.user_id, p.name, p.image_base64, p.brand, p.score
    FROM comparison_products cp
    JOIN products p ON p.id = cp.product_id
    WHERE cp.comparison_id = ANY($1)
    ORDER BY cp.id
"#;

pub struct ComparisonService;

impl ComparisonService {
    /// Page of comparisons ordered by id, each with its expanded product links.
    pub async fn list(pool: &PgPool, params: ListParams) -> Result<Vec<ComparisonDto>, AppError> {
        let (limit, offset) = params.bounds();
        let sql = format!(
            "SELECT {} FROM comparisons ORDER BY id LIMIT $1 OFFSET $2",
            COMPARISON_COLUMNS
        );
        tracing::debug!(sql = %sql, limit, offset, "query");
        let rows: Vec<Comparison> = sqlx::query_as(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = rows.iter().map(|c| c.id).collect();
        let mut links = Self::links_by_comparison(pool, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|c| {
                let products = links.remove(&c.id).unwrap_or_default();
                ComparisonDto::new(c, products)
            })
            .collect())
    }

    /// Fetch one comparison with its product links. `None` when absent.
    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<ComparisonDto>, AppError> {
        let sql = format!("SELECT {} FROM comparisons WHERE id = $1", COMPARISON_COLUMNS);
        let row: Option<Comparison> = sqlx::query_as(&sql).bind(id).fetch_optional(pool).await?;
        let Some(comparison) = row else {
            return Ok(None);
        };
        let products = Self::links_by_comparison(pool, &[id])
            .await?
            .remove(&id)
            .unwrap_or_default();
        Ok(Some(ComparisonDto::new(comparison, products)))
    }

    /// Create the comparison and its link rows atomically, then re-read the stored aggregate.
    ///
    /// The comparison id comes back from the INSERT inside the transaction, so link
    /// rows are written only after it exists and none are visible before commit.
    /// Product ids are not checked here; the foreign key rejects unknown ones and the
    /// whole transaction rolls back.
    pub async fn create(pool: &PgPool, body: &ComparisonCreate) -> Result<ComparisonDto, AppError> {
        let mut tx = pool.begin().await?;
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO comparisons (title, description, user_id, date_created, product_type_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&body.title)
        .bind(&body.description)
        .bind(&body.user_id)
        .bind(&body.date_created)
        .bind(body.product_type_id)
        .fetch_one(&mut *tx)
        .await?;

        for product_id in &body.products {
            sqlx::query("INSERT INTO comparison_products (comparison_id, product_id) VALUES ($1, $2)")
                .bind(id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::info!(id, links = body.products.len(), "comparison created");

        Self::get(pool, id)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Delete link rows then the comparison. Returns false when no comparison matched.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let mut tx = pool.begin().await?;
        let links = sqlx::query("DELETE FROM comparison_products WHERE comparison_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let deleted = sqlx::query("DELETE FROM comparisons WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::info!(id, links, "comparison deleted");
        Ok(true)
    }

    /// Batch-load links for several comparisons in one query, grouped by comparison id.
    async fn links_by_comparison(
        pool: &PgPool,
        comparison_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<ComparisonProductDto>>, AppError> {
        let rows: Vec<LinkedProductRow> = sqlx::query_as(LINKS_FOR_COMPARISONS)
            .bind(comparison_ids)
            .fetch_all(pool)
            .await?;
        let mut grouped: HashMap<i32, Vec<ComparisonProductDto>> = HashMap::new();
        for row in rows {
            grouped.entry(row.comparison_id).or_default().push(row.into());
        }
        Ok(grouped)
    }
}
