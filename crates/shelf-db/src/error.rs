//! # Database Error Types
//!
//! Error types for gateway and service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)        Domain rule (CoreError)             │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer displays a user-facing message                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing row is not an error here: services return `Ok(None)`.

use shelf_core::{CoreError, ValidationError};
use thiserror::Error;

/// Gateway and service errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A row expected to exist was not there (internal consistency).
    ///
    /// ## When This Occurs
    /// - An UPDATE matched no rows inside a unit of work that had just
    ///   loaded the same row
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a book for an author or genre id that does not exist
    /// - Removing a parent row that still owns books
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// A stored row failed entity validation when loaded.
    #[error("Stored {entity} {id} is invalid: {source}")]
    CorruptRow {
        entity: &'static str,
        id: i64,
        source: ValidationError,
    },

    /// A domain rule rejected the operation; nothing was committed.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// The domain error behind this failure, if any.
    pub fn as_domain(&self) -> Option<&CoreError> {
        match self {
            DbError::Domain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Domain(CoreError::Validation(err))
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → FK violation or QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports: "FOREIGN KEY constraint failed"
                if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_becomes_domain() {
        let err: DbError = ValidationError::Required { field: "title" }.into();
        assert!(matches!(
            err.as_domain(),
            Some(CoreError::Validation(ValidationError::Required { field: "title" }))
        ));
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err: DbError = CoreError::InvalidRestock { amount: 0 }.into();
        assert_eq!(err.to_string(), "Restock amount must be positive, got 0");
    }

    #[test]
    fn test_corrupt_row_message() {
        let err = DbError::CorruptRow {
            entity: "Book",
            id: 4,
            source: ValidationError::Negative { field: "stock" },
        };
        assert_eq!(err.to_string(), "Stored Book 4 is invalid: stock cannot be less than 0");
    }
}
