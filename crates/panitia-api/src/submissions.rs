//! Handler for the public form.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/submissions` | Body: [`SubmissionBody`]; 201 + stored row, 400 on validation |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use panitia_core::{directory::Directory, store::SubmissionStore, submission::Draft};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// JSON body accepted by `POST /submissions`.
///
/// Every field defaults to empty so that an incomplete form is reported by
/// validation rather than rejected by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionBody {
  pub employee_id:         String,
  pub instagram:           String,
  pub birth_place:         String,
  /// `YYYY-MM-DD`
  pub birth_date:          String,
  pub quotes:              String,
  pub program_studi:       String,
  pub program_studi_other: String,
}

impl SubmissionBody {
  /// An unknown employee id leaves the draft without an employee.
  pub fn into_draft(self, directory: &Directory) -> Draft {
    Draft {
      employee:            directory.get(&self.employee_id).cloned(),
      instagram:           self.instagram,
      birth_place:         self.birth_place,
      birth_date:          self.birth_date,
      quotes:              self.quotes,
      program_studi:       self.program_studi,
      program_studi_other: self.program_studi_other,
    }
  }
}

/// `POST /submissions`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SubmissionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  let employee_id = body.employee_id.clone();
  let input = body
    .into_draft(&state.directory)
    .validate()
    .inspect_err(|e| tracing::warn!(%employee_id, reason = %e, "rejected submission"))?;

  let stored = state.store.insert(input).await.map_err(ApiError::store)?;
  tracing::info!(employee_id = %stored.employee_id, id = %stored.id, "submission accepted");
  Ok((StatusCode::CREATED, Json(stored)))
}
