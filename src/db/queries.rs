use sqlx::{Connection, PgConnection};
use uuid::Uuid;

use crate::db::models::TransactionRow;
use crate::domain::Transaction;
use crate::error::{AppError, AppResult};

const SELECT_COLUMNS: &str = r#"
    SELECT transaction_id, user_id, timestamp, amount, currency, city, country,
        merchant_name, payment_method, ip_address, voucher_code, affiliate_id
    FROM transactions
"#;

/// Inserts one transaction inside its own database transaction.
///
/// Commits on success. On any failure the transaction is rolled back before
/// the error is returned, so no partial row is ever left behind. No retry.
pub async fn insert_transaction(conn: &mut PgConnection, tx: &Transaction) -> AppResult<()> {
    let mut db_tx = conn.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO transactions (
            transaction_id, user_id, timestamp, amount, currency, city, country,
            merchant_name, payment_method, ip_address, voucher_code, affiliate_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(tx.transaction_id.to_string())
    .bind(&tx.user_id)
    .bind(tx.timestamp)
    .bind(tx.amount)
    .bind(tx.currency.as_str())
    .bind(&tx.city)
    .bind(&tx.country)
    .bind(&tx.merchant_name)
    .bind(tx.payment_method.as_str())
    .bind(tx.ip_address.to_string())
    .bind(&tx.voucher_code)
    .bind(tx.affiliate_id.to_string())
    .execute(&mut *db_tx)
    .await;

    match result {
        Ok(_) => {
            db_tx.commit().await?;
            Ok(())
        }
        Err(err) => {
            match db_tx.rollback().await {
                Ok(()) => tracing::warn!("Transaction {} rolled back", tx.transaction_id),
                Err(rollback_err) => tracing::error!(
                    "Rollback of transaction {} failed: {}",
                    tx.transaction_id,
                    rollback_err
                ),
            }
            Err(AppError::Database(err))
        }
    }
}

pub async fn get_transaction(conn: &mut PgConnection, id: Uuid) -> AppResult<Transaction> {
    let query = format!("{} WHERE transaction_id = $1", SELECT_COLUMNS);
    let row = sqlx::query_as::<_, TransactionRow>(&query)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.ok_or_else(|| AppError::NotFound(id.to_string()))?
        .try_into()
}

pub async fn count_transactions(conn: &mut PgConnection) -> AppResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM transactions")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}
