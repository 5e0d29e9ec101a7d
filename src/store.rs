//! Table DDL and database bootstrap. Tables are created idempotently at startup.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Tables in dependency order: every table only references tables listed before it.
pub const TABLES: &[&str] = &[
    "product_types",
    "products",
    "product_metadata",
    "comparisons",
    "comparison_products",
];

const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS product_types (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        metadata_schema JSONB NOT NULL DEFAULT '{}'::jsonb
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        product_type_id INTEGER NOT NULL REFERENCES product_types (id),
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        image_base64 TEXT,
        brand TEXT,
        score DOUBLE PRECISION
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product_metadata (
        id SERIAL PRIMARY KEY,
        product_id INTEGER NOT NULL REFERENCES products (id),
        attribute TEXT NOT NULL,
        value TEXT NOT NULL,
        score DOUBLE PRECISION
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comparisons (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        user_id TEXT NOT NULL,
        date_created TEXT NOT NULL,
        product_type_id INTEGER NOT NULL REFERENCES product_types (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comparison_products (
        id SERIAL PRIMARY KEY,
        comparison_id INTEGER NOT NULL REFERENCES comparisons (id),
        product_id INTEGER NOT NULL REFERENCES products (id)
    )
    "#,
];

const INDEX_DDL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_products_product_type_id ON products (product_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_user_id ON products (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_product_metadata_product_id ON product_metadata (product_id)",
    "CREATE INDEX IF NOT EXISTS idx_comparison_products_comparison_id ON comparison_products (comparison_id)",
    "CREATE INDEX IF NOT EXISTS idx_comparison_products_product_id ON comparison_products (product_id)",
];

/// Create all application tables and their foreign-key indexes if missing.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLE_DDL.iter().chain(INDEX_DDL) {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!(tables = ?TABLES, "tables ensured");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
