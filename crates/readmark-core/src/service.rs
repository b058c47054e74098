//! Business rules layered over a [`StatusStore`].
//!
//! Reads are not pure: the first read of an unknown article creates a row
//! with the default status. Writes validate the status literal before the
//! store is touched.

use std::sync::Arc;

use thiserror::Error;

use crate::{
  Error,
  status::{ReadingStatus, Status},
  store::StatusStore,
};

/// Failure of a service operation.
///
/// `Invalid` is a caller mistake and never reaches the store; `Store` wraps
/// whatever the backend reported.
#[derive(Debug, Error)]
pub enum ServiceError<E> {
  #[error(transparent)]
  Invalid(#[from] Error),

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Get-or-create and upsert operations over any store backend.
pub struct StatusService<S> {
  store: Arc<S>,
}

impl<S> Clone for StatusService<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: StatusStore> StatusService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Return the status of `article_id`, creating it as
  /// [`Status::ToRead`] if it has never been written.
  pub async fn get_or_create(
    &self,
    article_id: &str,
  ) -> Result<ReadingStatus, ServiceError<S::Error>> {
    if let Some(existing) = self
      .store
      .find(article_id)
      .await
      .map_err(ServiceError::Store)?
    {
      return Ok(existing);
    }

    // A write that lands after the lookup wins over the default.
    self
      .store
      .create_if_absent(article_id, Status::default())
      .await
      .map_err(ServiceError::Store)
  }

  /// Parse `status` and write it for `article_id`.
  pub async fn set_status(
    &self,
    article_id: &str,
    status: &str,
  ) -> Result<ReadingStatus, ServiceError<S::Error>> {
    let status = Status::parse(status)?;
    self
      .store
      .upsert(article_id, status)
      .await
      .map_err(ServiceError::Store)
  }
}
