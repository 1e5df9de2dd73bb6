//! Error types for store operations.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while reading or writing the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A well-formed identifier matched no row.
    #[error("{entity} not found")]
    NotFound {
        /// Display name of the missing entity (e.g. `Review`).
        entity: &'static str,
    },

    /// A uniqueness constraint was violated.
    #[error("{entity} already exists")]
    AlreadyExists {
        /// Display name of the conflicting entity.
        entity: &'static str,
    },

    /// A foreign key pointed at a row that does not exist.
    #[error("referenced resource not found")]
    MissingReference,

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps a sqlx error raised while writing `entity` onto the store
    /// taxonomy, folding constraint violations into their specific kinds.
    #[must_use]
    pub fn on_write(err: sqlx::Error, entity: &'static str) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return Self::AlreadyExists { entity };
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return Self::MissingReference;
                }
                _ => {}
            }
        }
        Self::Database(err)
    }

    /// True when this error is the not-found kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
