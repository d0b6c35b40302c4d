//! `POST /export-sheet`: accepts table rows and answers with a spreadsheet
//! link. It prepares nothing and exports nothing.

use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

pub const PLACEHOLDER_SHEETS_URL: &str = "https://docs.google.com/spreadsheets/d/1/edit?usp=sharing";

#[derive(Debug, Deserialize)]
pub struct ExportSheetBody {
  pub data: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSheetResponse {
  pub success:    bool,
  pub message:    &'static str,
  pub sheets_url: &'static str,
}

/// `POST /export-sheet`
pub async fn handler(
  body: Result<Json<ExportSheetBody>, JsonRejection>,
) -> Result<Json<ExportSheetResponse>, ApiError> {
  let Json(body) = body.map_err(|e| {
    tracing::warn!(reason = %e, "malformed export-sheet body");
    ApiError::BadRequest("Gagal export data".to_owned())
  })?;
  tracing::debug!(rows = body.data.len(), "export-sheet placeholder");

  Ok(Json(ExportSheetResponse {
    success:    true,
    message:    "Data siap diexport",
    sheets_url: PLACEHOLDER_SHEETS_URL,
  }))
}
