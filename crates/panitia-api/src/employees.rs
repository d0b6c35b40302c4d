//! Handlers for the directory lookup.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/employees` | `?q=`; empty list for queries under two characters |
//! | `GET`  | `/employees/:id` | Single employee |
//! | `GET`  | `/program-studi` | Study-program options, sentinel last |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use panitia_core::{employee::Employee, store::SubmissionStore, submission::PROGRAM_STUDI};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  #[serde(default)]
  pub q: String,
}

/// `GET /employees?q=<text>`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Json<Vec<Employee>>
where
  S: SubmissionStore + Clone + 'static,
{
  Json(state.directory.search(&params.q).into_iter().cloned().collect())
}

/// `GET /employees/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  state
    .directory
    .get(&id)
    .cloned()
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("employee {id} not found")))
}

/// `GET /program-studi`
pub async fn program_studi() -> Json<&'static [&'static str]> { Json(PROGRAM_STUDI) }
