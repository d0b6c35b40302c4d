//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use panitia_core::submission::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Shown instead of the underlying cause when the store fails.
const STORE_FAILURE: &str = "Terjadi kesalahan saat mengakses data";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthorized: {0}")]
  Unauthorized(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Log a store failure and wrap it.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    tracing::error!(error = %e, "store failure");
    ApiError::Store(Box::new(e))
  }
}

impl From<ValidationError> for ApiError {
  fn from(e: ValidationError) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE.to_owned()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
