//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed number of
//! fractional digits so that lexical order equals chronological order.
//! UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use panitia_core::submission::Submission;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` on `form_submissions`, in
/// [`RawSubmission::from_row`] order.
pub const COLUMNS: &str = "id, employee_id, employee_name, full_name, sector, \
                           department, division, position, instagram, \
                           birth_place, birth_date, quotes, program_studi, \
                           created_at";

/// Raw strings read directly from a `form_submissions` row.
pub struct RawSubmission {
  pub id:            String,
  pub employee_id:   String,
  pub employee_name: String,
  pub full_name:     String,
  pub sector:        Option<String>,
  pub department:    Option<String>,
  pub division:      Option<String>,
  pub position:      Option<String>,
  pub instagram:     String,
  pub birth_place:   String,
  pub birth_date:    String,
  pub quotes:        String,
  pub program_studi: String,
  pub created_at:    String,
}

impl RawSubmission {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      employee_id:   row.get(1)?,
      employee_name: row.get(2)?,
      full_name:     row.get(3)?,
      sector:        row.get(4)?,
      department:    row.get(5)?,
      division:      row.get(6)?,
      position:      row.get(7)?,
      instagram:     row.get(8)?,
      birth_place:   row.get(9)?,
      birth_date:    row.get(10)?,
      quotes:        row.get(11)?,
      program_studi: row.get(12)?,
      created_at:    row.get(13)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:            decode_uuid(&self.id)?,
      employee_id:   self.employee_id,
      employee_name: self.employee_name,
      full_name:     self.full_name,
      sector:        self.sector,
      department:    self.department,
      division:      self.division,
      position:      self.position,
      instagram:     self.instagram,
      birth_place:   self.birth_place,
      birth_date:    self.birth_date,
      quotes:        self.quotes,
      program_studi: self.program_studi,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
