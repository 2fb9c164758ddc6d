use sqlx::{Connection, PgConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub mod models;
pub mod queries;

/// Create-if-absent DDL for the `transactions` table.
pub const SCHEMA_SQL: &str = include_str!("../../sql/transactions.sql");

/// Opens a single dedicated connection. No pooling.
pub async fn connect(config: &Config) -> AppResult<PgConnection> {
    tracing::debug!("Connecting to {}", config.masked_url());
    PgConnection::connect_with(&config.connect_options())
        .await
        .map_err(AppError::Connection)
}

/// Closes the connection gracefully. A failed close is only logged.
pub async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }
}

/// Creates the `transactions` table if it does not exist yet.
/// Safe to call repeatedly; existing rows are untouched.
pub async fn ensure_schema(conn: &mut PgConnection) -> AppResult<()> {
    sqlx::query(SCHEMA_SQL).execute(&mut *conn).await?;
    tracing::debug!("Schema ensured for table transactions");
    Ok(())
}
