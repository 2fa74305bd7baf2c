//! Error types for record store operations.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a database failure, shown in the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreDbErrorKind {
    /// `SQLite` reported the database as busy or locked.
    BusyOrLocked,
    /// No pooled connection became free in time.
    PoolTimeout,
    /// Any other database failure.
    Other,
}

impl StoreDbErrorKind {
    #[must_use]
    pub fn from_sqlx(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => Self::PoolTimeout,
            sqlx::Error::Database(database_error)
                if matches!(
                    database_error.code().as_deref(),
                    Some("SQLITE_BUSY" | "SQLITE_LOCKED" | "5" | "6")
                ) =>
            {
                Self::BusyOrLocked
            }
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusyOrLocked => "busy_or_locked",
            Self::PoolTimeout => "pool_timeout",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for StoreDbErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during record store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("record store unavailable ({kind}): {message}\n  Suggestion: Check that the database file is writable and not locked by another process")]
    Database {
        kind: StoreDbErrorKind,
        message: String,
    },

    /// A stored document could not be read back as an author profile.
    #[error("stored record {id} is corrupt: {reason}\n  Suggestion: Delete the row so the profile is fetched again")]
    Corrupt {
        /// Row id of the bad document
        id: i64,
        /// Why deserialization failed
        reason: String,
    },

    /// An update targeted a record that does not exist.
    #[error("author record not found: id {0}\n  Suggestion: The record may have been deleted concurrently")]
    NotFound(i64),

    /// A profile could not be encoded as a document.
    #[error("cannot encode author record: {0}")]
    Encode(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database {
            kind: StoreDbErrorKind::from_sqlx(&err),
            message: err.to_string(),
        }
    }
}
