//! JSON REST API for Panitia.
//!
//! Exposes an axum [`Router`] backed by any
//! [`panitia_core::store::SubmissionStore`] plus the loaded employee
//! directory. TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", panitia_api::api_router(state))
//! ```

pub mod admin;
pub mod employees;
pub mod error;
pub mod export_sheet;
pub mod gate;
pub mod submissions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use panitia_core::{directory::Directory, store::SubmissionStore};

pub use error::ApiError;
pub use gate::{ADMIN_HEADER, GateConfig};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers. Everything but the store is
/// read-only after startup.
#[derive(Clone)]
pub struct AppState<S: SubmissionStore> {
  pub store:     Arc<S>,
  pub directory: Arc<Directory>,
  pub gate:      Arc<GateConfig>,
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SubmissionStore + Clone + 'static,
{
  Router::new()
    // Directory
    .route("/employees", get(employees::search::<S>))
    .route("/employees/{id}", get(employees::get_one::<S>))
    .route("/program-studi", get(employees::program_studi))
    // Form
    .route("/submissions", post(submissions::create::<S>))
    // Admin
    .route("/admin/login", post(gate::login::<S>))
    .route("/admin/submissions", get(admin::list::<S>))
    .route("/admin/dashboard", get(admin::dashboard::<S>))
    // Placeholder
    .route("/export-sheet", post(export_sheet::handler))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
