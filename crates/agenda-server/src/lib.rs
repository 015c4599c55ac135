//! HTTP server wiring for the activity calendar.
//!
//! Holds the runtime configuration and assembles the top-level router that
//! `main.rs` serves.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use agenda_store_sqlite::SqliteStore;
use axum::Router;
use serde::Deserialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_request_timeout_secs() -> u64 { 30 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `AGENDA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  #[serde(default = "default_request_timeout_secs")]
  pub request_timeout_secs: u64,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the JSON API under `/api`, with request
/// tracing and a per-request timeout.
pub fn router(store: Arc<SqliteStore>, config: &ServerConfig) -> Router {
  Router::new()
    .nest("/api", agenda_api::api_router(store))
    .layer(TimeoutLayer::new(Duration::from_secs(
      config.request_timeout_secs,
    )))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
