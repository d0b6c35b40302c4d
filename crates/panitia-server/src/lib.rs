//! HTTP server assembly for Panitia.
//!
//! Holds the runtime configuration and wires the API router under `/api`
//! with request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::Router;
use panitia_api::{AppState, GateConfig};
use panitia_core::{directory::Directory, store::SubmissionStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PANITIA_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  /// JSON array of employee records.
  pub directory_path:      PathBuf,
  /// argon2 PHC string for the admin secret.
  pub admin_password_hash: String,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Assemble the handler state from its already-opened parts.
pub fn app_state<S: SubmissionStore>(
  store: S,
  directory: Directory,
  config: &ServerConfig,
) -> AppState<S> {
  AppState {
    store:     Arc::new(store),
    directory: Arc::new(directory),
    gate:      Arc::new(GateConfig::new(config.admin_password_hash.clone())),
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API under `/api`, traced.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SubmissionStore + Clone + 'static,
{
  Router::new()
    .nest("/api", panitia_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use panitia_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  const TOML: &str = r#"
    host                = "127.0.0.1"
    port                = 3000
    store_path          = "~/panitia/submissions.db"
    directory_path      = "data/employees.json"
    admin_password_hash = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"
  "#;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn config_parses_and_joins_the_address() {
    let cfg = parse(TOML);
    assert_eq!(cfg.address(), "127.0.0.1:3000");
    assert_eq!(cfg.directory_path, PathBuf::from("data/employees.json"));
  }

  async fn app() -> Router {
    let directory = Directory::from_json(
      r#"[{"id":"1","name":"Budi","full_name":"Budi Santoso","sector":"Umum","department":"Operasional","division":"Logistik"}]"#,
    )
    .unwrap();
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(app_state(store, directory, &parse(TOML)))
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let req = Request::builder().uri("/api/employees?q=bu").body(Body::empty()).unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body[0]["name"], "Budi");
  }

  #[tokio::test]
  async fn unprefixed_paths_are_not_found() {
    let req = Request::builder().uri("/employees?q=bu").body(Body::empty()).unwrap();
    let resp = app().await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
