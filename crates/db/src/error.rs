use schedgrid_timeline::TimelineError;
use std::path::PathBuf;
use thiserror::Error;

/// Database error types for Schedgrid
#[derive(Error, Debug)]
pub enum DbError {
    /// Error establishing connection to the database
    #[error("Failed to connect to database at {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: Box<surrealdb::Error>,
    },

    /// Error during schema initialization
    #[error("Failed to initialize database schema: {0}")]
    Schema(#[source] Box<surrealdb::Error>),

    /// Error executing a query
    #[error("Query execution failed")]
    Query(#[source] Box<surrealdb::Error>),

    /// Error with database path (invalid or inaccessible)
    #[error("Invalid database path: {path} - {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    /// Error creating database directory
    #[error("Failed to create database directory at {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error when a requested record was not found
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Error for invalid input or validation failure
    #[error("{message}")]
    ValidationError { message: String },

    /// A work order would overlap another order on the same work center
    #[error(
        "Work order conflicts with '{conflicting_id}' ({conflicting_start} to {conflicting_end}) on work center '{work_center}'"
    )]
    ScheduleConflict {
        work_center: String,
        conflicting_id: String,
        conflicting_start: chrono::NaiveDate,
        conflicting_end: chrono::NaiveDate,
    },

    /// A work center cannot be removed while orders are assigned to it
    #[error("Work center '{id}' still has {order_count} work order(s) assigned")]
    WorkCenterInUse { id: String, order_count: usize },

    /// A stored record could not be decoded
    #[error("Stored {entity} '{id}' is corrupt: {reason}")]
    CorruptRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    /// Timeline computation rejected its input
    #[error(transparent)]
    Timeline(#[from] TimelineError),
}

impl From<surrealdb::Error> for DbError {
    fn from(err: surrealdb::Error) -> Self {
        DbError::Query(Box::new(err))
    }
}

impl DbError {
    /// Get the full error message including nested SurrealDB error details.
    ///
    /// This is useful for displaying detailed error information to users.
    pub fn full_message(&self) -> String {
        match self {
            DbError::Query(err) => format!("Query execution failed: {}", err),
            other => other.to_string(),
        }
    }

    /// Shorthand for a validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        DbError::ValidationError {
            message: message.into(),
        }
    }
}

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;
