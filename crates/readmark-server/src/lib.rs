//! Server assembly for readmark: configuration, database location and the
//! top-level router.

use std::{
  future::Future,
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use readmark_core::StatusStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `READMARK_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  /// Where the status table lives; see [`DatabaseLocation::parse`].
  #[serde(default = "default_database_url")]
  pub database_url: String,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///./data/read_status.db";

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_database_url() -> String { DEFAULT_DATABASE_URL.to_string() }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      database_url: default_database_url(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `READMARK_*` environment
  /// variables. A `database_url` override (the conventional `DATABASE_URL`
  /// variable) wins over both.
  pub fn load(
    path: &Path,
    database_url: Option<String>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("READMARK"))
      .set_override_option("database_url", database_url)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Database location ───────────────────────────────────────────────────────

/// A parsed `database_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
  Memory,
  File(PathBuf),
}

impl DatabaseLocation {
  /// Accepts `sqlite:///path`, `sqlite://path`, `sqlite:path`, a bare path,
  /// or `:memory:` behind any of those prefixes.
  pub fn parse(url: &str) -> Self {
    let rest = ["sqlite:///", "sqlite://", "sqlite:"]
      .iter()
      .find_map(|prefix| url.strip_prefix(prefix))
      .unwrap_or(url);

    if rest.is_empty() || rest == ":memory:" {
      DatabaseLocation::Memory
    } else {
      DatabaseLocation::File(expand_tilde(Path::new(rest)))
    }
  }

  /// The directory that must exist before the file can be opened, if any.
  pub fn parent_dir(&self) -> Option<&Path> {
    match self {
      DatabaseLocation::Memory => None,
      DatabaseLocation::File(path) => path.parent().filter(|p| !p.as_os_str().is_empty()),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the JSON API plus request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: StatusStore + 'static,
{
  readmark_api::api_router(store).layer(TraceLayer::new_for_http())
}

// ─── Shutdown ────────────────────────────────────────────────────────────────

/// Which signal ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
  Interrupt,
  Terminate,
}

/// Resolve when either `interrupt` or `terminate` completes.
pub async fn shutdown_on(
  interrupt: impl Future<Output = ()>,
  terminate: impl Future<Output = ()>,
) -> ShutdownReason {
  let reason = tokio::select! {
    () = interrupt => ShutdownReason::Interrupt,
    () = terminate => ShutdownReason::Terminate,
  };
  tracing::info!(?reason, "shutting down");
  reason
}

/// Wait for SIGINT (ctrl-c) or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
  let interrupt = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for ctrl-c");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  shutdown_on(interrupt, terminate).await;
}
