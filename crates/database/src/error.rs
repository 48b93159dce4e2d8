use chrono::NaiveDate;
use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid data source configuration: {0}")]
    ConnectionConfigError(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid SQL identifier for {0}: '{1}' (only letters, digits and '_' are allowed)")]
    InvalidIdentifier(&'static str, String),

    #[error("Connected to database '{actual}' but the source expects '{expected}'")]
    WrongDatabase { expected: String, actual: String },

    #[error("Row for {date} is invalid: {source}")]
    InvalidRow {
        date: NaiveDate,
        #[source]
        source: CoreError,
    },
}
