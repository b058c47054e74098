//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings in UTC. Statuses are stored as
//! their snake_case literal.

use chrono::{DateTime, TimeDelta, Utc};
use readmark_core::status::{ReadingStatus, Status};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// The `updated_at` to stamp on a row last written at `previous`.
///
/// Uses `now` unless the clock has not moved past `previous`, in which case
/// the result is one microsecond after it.
pub fn next_updated_at(
  now: DateTime<Utc>,
  previous: DateTime<Utc>,
) -> DateTime<Utc> {
  if now > previous {
    now
  } else {
    previous + TimeDelta::microseconds(1)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<Status> { Ok(Status::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawReadingStatus::from_row`].
pub const COLUMNS: &str = "article_id, status, created_at, updated_at";

/// Raw strings read directly from a `reading_status` row.
pub struct RawReadingStatus {
  pub article_id: String,
  pub status:     String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawReadingStatus {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      article_id: row.get(0)?,
      status:     row.get(1)?,
      created_at: row.get(2)?,
      updated_at: row.get(3)?,
    })
  }

  pub fn into_reading_status(self) -> Result<ReadingStatus> {
    Ok(ReadingStatus {
      article_id: self.article_id,
      status:     decode_status(&self.status)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn next_updated_at_prefers_now() {
    let previous = Utc::now();
    let now = previous + TimeDelta::seconds(1);
    assert_eq!(next_updated_at(now, previous), now);
  }

  #[test]
  fn next_updated_at_bumps_stalled_clock() {
    let previous = Utc::now();
    assert_eq!(
      next_updated_at(previous, previous),
      previous + TimeDelta::microseconds(1)
    );
    assert!(next_updated_at(previous - TimeDelta::seconds(5), previous) > previous);
  }

  #[test]
  fn dt_survives_storage_encoding() {
    let dt = Utc::now();
    assert_eq!(decode_dt(&encode_dt(dt)).unwrap(), dt);
  }
}
