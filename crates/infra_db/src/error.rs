//! Database error types

use thiserror::Error;

use domain_adjudication::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Stored rows violate a temporal invariant (overlapping windows)
    #[error("Temporal overlap detected: {0}")]
    TemporalOverlap(String),

    /// A stored value could not be decoded into its domain type
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Transaction error
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionFailed(err.to_string())
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

impl From<DatabaseError> for PortError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(message) => PortError::unavailable(message),
            DatabaseError::TemporalOverlap(message) => PortError::integrity(message),
            DatabaseError::Decode(message) => PortError::integrity(message),
            other => PortError::unavailable(other.to_string()),
        }
    }
}
