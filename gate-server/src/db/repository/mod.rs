//! Repository Module
//!
//! Data access for the ticket ledger. Repositories are free functions over
//! `&SqlitePool`; all timestamps are `i64` Unix millis, all ids snowflake
//! `i64`. No business decisions live here except the ones the schema itself
//! enforces (unique code, unique check-in per purchase).

pub mod check_in;
pub mod ticket;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
