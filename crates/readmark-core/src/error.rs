//! Error types for `readmark-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown status {0:?}; expected one of: to_read, reading, read")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
