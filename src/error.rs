use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid environment variable {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("Failed to load env file: {0}")]
    EnvFile(String),

    #[error("Connection error")]
    Connection(#[source] sqlx::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::MissingEnv(_) | AppError::InvalidEnv { .. } | AppError::EnvFile(_) => 2,
            AppError::Connection(_) => 3,
            AppError::Database(_) => 4,
            AppError::Decode(_) | AppError::NotFound(_) => 1,
        }
    }

    /// True when the database rejected a row because of a unique or primary key.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
