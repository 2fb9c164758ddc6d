use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::Transaction;
use crate::error::AppError;

/// Row type for SQLx. Every column is stored as plain text or a scalar.
#[derive(Debug, FromRow)]
pub struct TransactionRow {
    pub transaction_id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub currency: String,
    pub city: String,
    pub country: String,
    pub merchant_name: String,
    pub payment_method: String,
    pub ip_address: String,
    pub voucher_code: String,
    pub affiliate_id: String,
}

fn parse_uuid(column: &str, raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|e| AppError::Decode(format!("{} '{}': {}", column, raw, e)))
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            transaction_id: parse_uuid("transaction_id", &row.transaction_id)?,
            user_id: row.user_id,
            timestamp: row.timestamp,
            amount: row.amount,
            currency: row.currency.parse().map_err(AppError::Decode)?,
            city: row.city,
            country: row.country,
            merchant_name: row.merchant_name,
            payment_method: row.payment_method.parse().map_err(AppError::Decode)?,
            ip_address: row.ip_address.parse().map_err(|e| {
                AppError::Decode(format!("ip_address '{}': {}", row.ip_address, e))
            })?,
            voucher_code: row.voucher_code,
            affiliate_id: parse_uuid("affiliate_id", &row.affiliate_id)?,
        })
    }
}
