//! Error type for `readmark-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] readmark_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A write violated a table constraint, e.g. a status outside the allowed
  /// set.
  #[error("constraint violation: {0}")]
  ConstraintViolation(String),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Lift a constraint failure out of the generic database error so callers
  /// can tell it apart from connection-level problems.
  pub(crate) fn classify(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, msg))
        if f.code == rusqlite::ErrorCode::ConstraintViolation =>
      {
        Error::ConstraintViolation(msg.unwrap_or_else(|| f.to_string()))
      }
      other => Error::Database(other),
    }
  }
}
