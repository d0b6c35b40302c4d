//! Async HTTP client wrapping the panitia JSON API.

use std::time::Duration;

use panitia_core::{
  employee::Employee,
  submission::{Draft, Submission},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Header carrying the admin secret.
const ADMIN_HEADER: &str = "x-admin-password";

/// Connection settings for the panitia API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
  /// The admin secret was missing or wrong.
  #[error("{0}")]
  Unauthorized(String),

  /// The server refused the request with a message meant for the user.
  #[error("{0}")]
  Rejected(String),

  #[error("{method} {path} → {status}: {message}")]
  Server {
    method:  &'static str,
    path:    &'static str,
    status:  StatusCode,
    message: String,
  },

  #[error(transparent)]
  Http(#[from] reqwest::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Wire shape of `POST /api/submissions`.
#[derive(Serialize)]
struct SubmissionBody<'a> {
  employee_id:         &'a str,
  instagram:           &'a str,
  birth_place:         &'a str,
  birth_date:          &'a str,
  quotes:              &'a str,
  program_studi:       &'a str,
  program_studi_other: &'a str,
}

impl<'a> SubmissionBody<'a> {
  fn from_draft(draft: &'a Draft) -> Self {
    Self {
      employee_id:         draft.employee.as_ref().map_or("", |e| e.id.as_str()),
      instagram:           &draft.instagram,
      birth_place:         &draft.birth_place,
      birth_date:          &draft.birth_date,
      quotes:              &draft.quotes,
      program_studi:       &draft.program_studi,
      program_studi_other: &draft.program_studi_other,
    }
  }
}

/// Async HTTP client for the panitia JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn admin(&self, req: RequestBuilder, password: &str) -> RequestBuilder {
    req.header(ADMIN_HEADER, password)
  }

  // ── Directory ─────────────────────────────────────────────────────────────

  /// `GET /api/employees?q=<query>`
  pub async fn search_employees(&self, query: &str) -> Result<Vec<Employee>> {
    let resp = self
      .client
      .get(self.url("/employees"))
      .query(&[("q", query)])
      .send()
      .await?;
    Ok(check("GET", "/employees", resp).await?.json().await?)
  }

  /// `GET /api/program-studi`
  pub async fn program_studi(&self) -> Result<Vec<String>> {
    let resp = self.client.get(self.url("/program-studi")).send().await?;
    Ok(check("GET", "/program-studi", resp).await?.json().await?)
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  /// `POST /api/submissions`
  pub async fn submit(&self, draft: &Draft) -> Result<Submission> {
    let resp = self
      .client
      .post(self.url("/submissions"))
      .json(&SubmissionBody::from_draft(draft))
      .send()
      .await?;
    Ok(check("POST", "/submissions", resp).await?.json().await?)
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `POST /api/admin/login` — `Ok(false)` for a wrong secret.
  pub async fn login(&self, password: &str) -> Result<bool> {
    let resp = self
      .client
      .post(self.url("/admin/login"))
      .json(&json!({ "password": password }))
      .send()
      .await?;
    match check("POST", "/admin/login", resp).await {
      Ok(_) => Ok(true),
      Err(ClientError::Unauthorized(_)) => Ok(false),
      Err(e) => Err(e),
    }
  }

  /// `GET /api/admin/submissions` — every row, newest first. The dashboard
  /// and all exports are built from this set.
  pub async fn submissions(&self, password: &str) -> Result<Vec<Submission>> {
    let resp = self
      .admin(self.client.get(self.url("/admin/submissions")), password)
      .send()
      .await?;
    Ok(check("GET", "/admin/submissions", resp).await?.json().await?)
  }
}

/// Pass successful responses through; turn the rest into [`ClientError`]
/// using the server's `{"error": ...}` body when there is one.
async fn check(method: &'static str, path: &'static str, resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let text = resp.text().await.unwrap_or_default();
  let message = serde_json::from_str::<ErrorBody>(&text)
    .map(|b| b.error)
    .unwrap_or(text);
  Err(match status {
    StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
    StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Rejected(message),
    _ => ClientError::Server { method, path, status, message },
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn submission_body_uses_raw_draft_fields() {
    let draft = Draft {
      instagram: "@budi".into(),
      program_studi: "Lainnya".into(),
      program_studi_other: "Program Studi Astronomi".into(),
      ..Draft::default()
    };
    let v = serde_json::to_value(SubmissionBody::from_draft(&draft)).unwrap();
    assert_eq!(v["employee_id"], "");
    assert_eq!(v["instagram"], "@budi");
    assert_eq!(v["program_studi"], "Lainnya");
    assert_eq!(v["program_studi_other"], "Program Studi Astronomi");
  }
}
