//! The reading status of an article and the record that stores it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use utoipa::ToSchema;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// How far a reader has progressed through an article.
///
/// There is no ordering between states; any status may follow any other.
/// Articles read before any write start as `to_read`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
  ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[schema(as = StatusEnum)]
pub enum Status {
  #[default]
  ToRead,
  Reading,
  Read,
}

impl Status {
  /// The wire and storage literal, e.g. `"to_read"`.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse a wire literal, rejecting anything outside the three states.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownStatus(s.to_owned()))
  }

  /// Every literal in declaration order.
  pub fn literals() -> Vec<&'static str> {
    Self::iter().map(Self::as_str).collect()
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// The persisted status of a single article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStatus {
  pub article_id: String,
  pub status:     Status,
  /// Set once, when the row is first written.
  pub created_at: DateTime<Utc>,
  /// Refreshed on every write; never earlier than `created_at`.
  pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literals_are_snake_case() {
    assert_eq!(Status::literals(), vec!["to_read", "reading", "read"]);
    assert_eq!(Status::ToRead.to_string(), "to_read");
  }

  #[test]
  fn parse_accepts_known_literals() {
    assert_eq!(Status::parse("to_read").unwrap(), Status::ToRead);
    assert_eq!(Status::parse("reading").unwrap(), Status::Reading);
    assert_eq!(Status::parse("read").unwrap(), Status::Read);
  }

  #[test]
  fn parse_rejects_unknown_literals() {
    for bad in ["invalid_status", "Read", "TO_READ", "", "to-read"] {
      match Status::parse(bad) {
        Err(Error::UnknownStatus(s)) => assert_eq!(s, bad),
        other => panic!("expected UnknownStatus for {bad:?}, got {other:?}"),
      }
    }
  }

  #[test]
  fn default_is_to_read() {
    assert_eq!(Status::default(), Status::ToRead);
  }
}
