//! Handlers for the admin dashboard. Every route requires [`AdminGate`].
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admin/submissions` | All rows, newest first |
//! | `GET`  | `/admin/dashboard` | Totals, per-group stats, recent rows |
//!
//! Exports are rendered by the client from the rows it fetched; there is no
//! download route here.

use axum::{Json, extract::State};
use panitia_core::{stats::Dashboard, store::SubmissionStore, submission::Submission};

use crate::{AppState, error::ApiError, gate::AdminGate};

/// `GET /admin/submissions`
pub async fn list<S>(
  _gate: AdminGate,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Submission>>, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let rows = state.store.list_recent().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /admin/dashboard`
pub async fn dashboard<S>(
  _gate: AdminGate,
  State(state): State<AppState<S>>,
) -> Result<Json<Dashboard>, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let rows = state.store.list_recent().await.map_err(ApiError::store)?;
  Ok(Json(Dashboard::build(&rows)))
}
