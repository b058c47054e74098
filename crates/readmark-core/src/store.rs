//! The `StatusStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `readmark-store-sqlite`).
//! Higher layers (`readmark-api`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::status::{ReadingStatus, Status};

/// Abstraction over a reading-status store backend.
///
/// Implementations hold no per-request state: every call borrows the backing
/// connection for the duration of one operation and releases it afterwards,
/// whether the operation succeeded or not.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait StatusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up the record for `article_id`. Returns `None` if it has never been
  /// written. Has no side effects.
  fn find<'a>(
    &'a self,
    article_id: &'a str,
  ) -> impl Future<Output = Result<Option<ReadingStatus>, Self::Error>> + Send + 'a;

  /// Insert or overwrite the status for `article_id` and return the row as
  /// persisted.
  ///
  /// A new row gets `created_at == updated_at`. An existing row keeps its
  /// `created_at` and gets a fresh, strictly later `updated_at`. Concurrent
  /// upserts on the same key are serialised by the backend; the last writer
  /// wins.
  fn upsert<'a>(
    &'a self,
    article_id: &'a str,
    status: Status,
  ) -> impl Future<Output = Result<ReadingStatus, Self::Error>> + Send + 'a;

  /// Insert `article_id` with `status` unless a row already exists, and
  /// return whichever row is stored afterwards.
  ///
  /// Never overwrites: if another writer created the row first, its status
  /// and timestamps are returned unchanged.
  fn create_if_absent<'a>(
    &'a self,
    article_id: &'a str,
    status: Status,
  ) -> impl Future<Output = Result<ReadingStatus, Self::Error>> + Send + 'a;
}
