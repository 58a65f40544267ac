//! Unified error type for data layer
//!
//! Wraps backend errors behind the repository trait so callers do not
//! depend on the SQLite module directly.

use thiserror::Error;

use crate::data::filters::FilterError;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Query rejected before reaching the database
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] FilterError),

    /// A single-result query matched several rows
    #[error("Expected at most one result, found more than one")]
    NonUniqueResult,
}

impl DataError {
    /// Whether the caller supplied a bad query or condition
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::NonUniqueResult)
    }
}

/// Convert from the SQLite backend error
impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            crate::data::sqlite::SqliteError::Io(e) => Self::Io(e),
            crate::data::sqlite::SqliteError::InvalidQuery(e) => Self::InvalidQuery(e),
            crate::data::sqlite::SqliteError::NonUniqueResult => Self::NonUniqueResult,
        }
    }
}
