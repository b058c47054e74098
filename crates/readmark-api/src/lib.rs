//! JSON REST API for readmark.
//!
//! Exposes an axum [`Router`] backed by any [`readmark_core::StatusStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = readmark_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod openapi;
pub mod status;

use std::sync::Arc;

use axum::{Router, routing::get};
use readmark_core::{StatusService, StatusStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StatusStore + 'static,
{
  Router::new()
    .route(
      "/articles/{article_id}/status",
      get(status::get_one::<S>).put(status::put_one::<S>),
    )
    .route("/openapi.json", get(openapi::handler))
    .with_state(StatusService::new(store))
}

// ─── Integration tests ────────────────────────────────────────────────────────
