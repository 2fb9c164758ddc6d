pub mod transaction;

pub use transaction::{Currency, PaymentMethod, Transaction};
