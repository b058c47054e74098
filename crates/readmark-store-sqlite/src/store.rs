//! [`SqliteStore`] — the SQLite implementation of [`StatusStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use readmark_core::{
  status::{ReadingStatus, Status},
  store::StatusStore,
};

use crate::{
  encode::{COLUMNS, RawReadingStatus, encode_dt, encode_status, next_updated_at},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A reading-status store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each
/// operation borrows the connection for exactly one closure on the
/// connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or update a row with an already-encoded status literal.
  ///
  /// The read of the previous `updated_at`, the write, and the read-back all
  /// happen inside one immediate transaction.
  pub(crate) async fn write(
    &self,
    article_id: String,
    status: String,
  ) -> Result<ReadingStatus> {
    let now = Utc::now();

    let raw: RawReadingStatus = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let previous: Option<String> = tx
          .query_row(
            "SELECT updated_at FROM reading_status WHERE article_id = ?1",
            rusqlite::params![article_id],
            |r| r.get(0),
          )
          .optional()?;

        let stamp = match previous {
          Some(prev) => {
            let prev = DateTime::parse_from_rfc3339(&prev)
              .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?
              .with_timezone(&Utc);
            encode_dt(next_updated_at(now, prev))
          }
          None => encode_dt(now),
        };

        tx.execute(
          "INSERT INTO reading_status (article_id, status, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)
           ON CONFLICT (article_id) DO UPDATE SET
             status     = excluded.status,
             updated_at = excluded.updated_at",
          rusqlite::params![article_id, status, stamp],
        )?;

        let raw = tx.query_row(
          &format!("SELECT {COLUMNS} FROM reading_status WHERE article_id = ?1"),
          rusqlite::params![article_id],
          RawReadingStatus::from_row,
        )?;

        tx.commit()?;
        Ok(raw)
      })
      .await
      .map_err(Error::classify)?;

    raw.into_reading_status()
  }
}

// ─── StatusStore impl ────────────────────────────────────────────────────────

impl StatusStore for SqliteStore {
  type Error = Error;

  async fn find(&self, article_id: &str) -> Result<Option<ReadingStatus>> {
    let id = article_id.to_owned();

    let raw: Option<RawReadingStatus> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM reading_status WHERE article_id = ?1"),
            rusqlite::params![id],
            RawReadingStatus::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawReadingStatus::into_reading_status).transpose()
  }

  async fn upsert(&self, article_id: &str, status: Status) -> Result<ReadingStatus> {
    let record = self
      .write(article_id.to_owned(), encode_status(status).to_owned())
      .await?;
    tracing::debug!(
      article_id = %record.article_id,
      status = %record.status,
      "status written"
    );
    Ok(record)
  }

  async fn create_if_absent(&self, article_id: &str, status: Status) -> Result<ReadingStatus> {
    let id = article_id.to_owned();
    let status = encode_status(status).to_owned();
    let stamp = encode_dt(Utc::now());

    let (inserted, raw): (bool, RawReadingStatus) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = tx.execute(
          "INSERT INTO reading_status (article_id, status, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)
           ON CONFLICT (article_id) DO NOTHING",
          rusqlite::params![id, status, stamp],
        )? == 1;

        let raw = tx.query_row(
          &format!("SELECT {COLUMNS} FROM reading_status WHERE article_id = ?1"),
          rusqlite::params![id],
          RawReadingStatus::from_row,
        )?;

        tx.commit()?;
        Ok((inserted, raw))
      })
      .await
      .map_err(Error::classify)?;

    let record = raw.into_reading_status()?;
    if inserted {
      tracing::debug!(article_id = %record.article_id, "default status created");
    }
    Ok(record)
  }
}
