pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod services;
pub mod use_cases;

pub use config::Config;
pub use domain::{Currency, PaymentMethod, Transaction};
pub use error::{AppError, AppResult};
