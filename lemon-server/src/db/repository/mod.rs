//! Repository Module
//!
//! Free async functions over `&SqlitePool` (or a transaction connection),
//! one module per table family. Money columns are integer cents.

// Identity
pub mod token;
pub mod user;

// Catalog
pub mod category;
pub mod menu_item;

// Cart / orders
pub mod cart;
pub mod order;

// Bookings
pub mod booking;

pub mod filter;

pub use filter::SqlFilter;

use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Validation(db_err.message().to_string());
            }
            if db_err.is_check_violation() {
                return RepoError::Validation(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Database operation failed");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_map_to_app_errors() {
        let e: AppError = RepoError::NotFound("Booking 4".into()).into();
        assert_eq!(e.code, ErrorCode::NotFound);

        let e: AppError = RepoError::Duplicate("UNIQUE".into()).into();
        assert_eq!(e.code, ErrorCode::AlreadyExists);

        let e: AppError = RepoError::Database("disk I/O error".into()).into();
        assert_eq!(e.code, ErrorCode::DatabaseError);
    }
}
