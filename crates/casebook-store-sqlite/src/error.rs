//! Error type for `casebook-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The database file could not be opened or initialised.
  #[error("cannot open store at {}: {source}", .path.display())]
  Open {
    path:   PathBuf,
    #[source]
    source: tokio_rusqlite::Error,
  },

  /// A write violated a NOT NULL, foreign key or uniqueness rule. Nothing
  /// was written.
  #[error("constraint violation: {0}")]
  Constraint(String),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),
}

impl Error {
  /// Sort a raw database error into [`Error::Constraint`] or
  /// [`Error::Database`].
  pub(crate) fn classify(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, message))
        if code.code == rusqlite::ErrorCode::ConstraintViolation =>
      {
        Error::Constraint(message.unwrap_or_else(|| code.to_string()))
      }
      other => Error::Database(other),
    }
  }

  pub fn is_constraint(&self) -> bool { matches!(self, Error::Constraint(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
