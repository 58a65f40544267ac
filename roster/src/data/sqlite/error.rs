//! SQLite error types

use thiserror::Error;

use crate::data::filters::FilterError;

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] FilterError),

    #[error("Expected at most one result, found more than one")]
    NonUniqueResult,
}
