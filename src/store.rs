//! Connection pool and entity table bootstrap.

use crate::config::{ResolvedModel, Settings};
use crate::error::AppError;
use crate::sql::create_table;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open the pool and verify the store answers before the server starts accepting requests.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.request_timeout)
        .connect(&settings.database_url)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!(max_connections = settings.max_connections, "database pool ready");
    Ok(pool)
}

/// `CREATE TABLE IF NOT EXISTS` for every resolved entity. Existing tables are left untouched.
pub async fn ensure_tables(pool: &PgPool, model: &ResolvedModel) -> Result<(), AppError> {
    for schema in &model.entities {
        sqlx::query(&create_table(schema)).execute(pool).await?;
        tracing::debug!(table = schema.table, "table ensured");
    }
    Ok(())
}
