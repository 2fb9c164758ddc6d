//! Record transaction use case.
//! Connects, ensures the schema, generates one record and inserts it.

use sqlx::PgConnection;

use crate::config::Config;
use crate::db::{self, queries};
use crate::domain::Transaction;
use crate::error::AppResult;
use crate::services::generator;

/// Use case for seeding a single synthetic transaction.
pub struct RecordTransaction<'a> {
    config: &'a Config,
}

impl<'a> RecordTransaction<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Runs the whole flow once. `on_generated` sees the record before it is
    /// inserted. The connection is closed on every path after it is opened.
    pub async fn execute<F>(&self, on_generated: F) -> AppResult<Transaction>
    where
        F: FnOnce(&Transaction),
    {
        let mut conn = db::connect(self.config).await?;
        tracing::info!("Connected to {}", self.config.masked_url());

        let outcome = generate_and_insert(&mut conn, on_generated).await;
        db::close(conn).await;
        outcome
    }
}

async fn generate_and_insert<F>(conn: &mut PgConnection, on_generated: F) -> AppResult<Transaction>
where
    F: FnOnce(&Transaction),
{
    db::ensure_schema(conn).await?;

    let tx = generator::generate();
    tracing::debug!(?tx, voucher = tx.has_voucher(), "Generated transaction");
    on_generated(&tx);

    queries::insert_transaction(conn, &tx).await?;
    tracing::info!("Transaction committed successfully.");
    Ok(tx)
}
