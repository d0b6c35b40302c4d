//! The shared-secret admin gate.
//!
//! One secret, stored as an argon2 PHC hash, unlocks every `/admin` route.
//! Clients send it in the [`ADMIN_HEADER`] header on each request; there is
//! no session and nothing expires. This keeps casual visitors out of the
//! dashboard and is not meant as real authentication.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/admin/login` | Body: `{"password":"..."}`; 200 or 401 |

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::{self, SaltString},
};
use axum::{Json, extract::FromRequestParts, extract::State, http::request::Parts};
use panitia_core::store::SubmissionStore;
use rand_core::OsRng;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// Request header carrying the admin secret.
pub const ADMIN_HEADER: &str = "x-admin-password";

const WRONG_PASSWORD: &str = "Password salah!";
const MISSING_PASSWORD: &str = "Password admin diperlukan";

/// The configured secret.
#[derive(Clone)]
pub struct GateConfig {
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl GateConfig {
  pub fn new(password_hash: impl Into<String>) -> Self {
    Self { password_hash: password_hash.into() }
  }

  /// Whether `password` is the configured secret. A malformed hash never
  /// matches.
  pub fn verify(&self, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
      tracing::error!("admin_password_hash is not a valid PHC string");
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  }
}

/// Hash `password` with a fresh salt, for `admin_password_hash`.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
  let salt = SaltString::generate(&mut OsRng);
  Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Zero-size marker: present in the handler means the request carried the
/// admin secret.
pub struct AdminGate;

impl<S> FromRequestParts<AppState<S>> for AdminGate
where
  S: SubmissionStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let supplied = parts
      .headers
      .get(ADMIN_HEADER)
      .and_then(|v| v.to_str().ok())
      .ok_or_else(|| ApiError::Unauthorized(MISSING_PASSWORD.to_owned()))?;

    if state.gate.verify(supplied) {
      Ok(AdminGate)
    } else {
      tracing::warn!(path = %parts.uri.path(), "rejected admin request");
      Err(ApiError::Unauthorized(WRONG_PASSWORD.to_owned()))
    }
  }
}

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub password: String,
}

/// `POST /admin/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<Value>, ApiError>
where
  S: SubmissionStore + Clone + 'static,
{
  if state.gate.verify(&body.password) {
    tracing::info!("admin login");
    Ok(Json(json!({ "authenticated": true })))
  } else {
    tracing::warn!("rejected admin login");
    Err(ApiError::Unauthorized(WRONG_PASSWORD.to_owned()))
  }
}
