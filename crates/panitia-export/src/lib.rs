//! Export renderers for the admin dashboard.
//!
//! Turns an already-fetched submission set into a downloadable CSV file, a
//! printable standalone HTML document, or a multi-sheet XLSX workbook. Pure
//! synchronous; no HTTP or database dependencies, and nothing is re-fetched.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::FixedOffset;
//! use panitia_export::{ExportContext, ExportFormat};
//!
//! # let rows: Vec<panitia_core::submission::Submission> = Vec::new();
//! let ctx = ExportContext::now(FixedOffset::east_opt(7 * 3600).unwrap());
//! let artifact = ExportFormat::Csv.render(&rows, &ctx)?;
//! println!("{} ({} bytes)", artifact.filename, artifact.body.len());
//! # Ok::<(), panitia_export::Error>(())
//! ```

mod csv_file;
pub mod error;
mod html;
mod row;
pub mod sheet_name;
mod workbook;

use std::{fmt, str::FromStr};

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use panitia_core::submission::Submission;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use row::{COLUMN_WIDTHS, HEADERS};

/// Stem shared by every export filename.
pub const FILE_STEM: &str = "Form_Panitia_Per_Departemen";

// ─── Context ─────────────────────────────────────────────────────────────────

/// When the export is produced and in which UTC offset timestamps render.
#[derive(Debug, Clone, Copy)]
pub struct ExportContext {
  pub generated_at: DateTime<FixedOffset>,
}

impl ExportContext {
  pub fn now(offset: FixedOffset) -> Self {
    Self { generated_at: Utc::now().with_timezone(&offset) }
  }

  pub fn at(generated_at: DateTime<FixedOffset>) -> Self { Self { generated_at } }

  pub(crate) fn offset(&self) -> FixedOffset { *self.generated_at.offset() }

  /// `<stem>_<YYYY-MM-DD>.<ext>`
  pub(crate) fn filename(&self, ext: &str) -> String {
    format!("{FILE_STEM}_{}.{ext}", self.generated_at.format("%Y-%m-%d"))
  }
}

// ─── Artifact ────────────────────────────────────────────────────────────────

/// A rendered download.
#[derive(Debug, Clone)]
pub struct Artifact {
  pub filename:     String,
  pub content_type: &'static str,
  pub body:         Bytes,
  /// Meant to be opened and read (printed, copied) rather than just kept.
  pub inline:       bool,
}

// ─── Formats ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
  Csv,
  Html,
  Xlsx,
}

impl ExportFormat {
  /// Render `submissions` (newest first, as fetched).
  ///
  /// Fails with [`Error::Empty`] before doing any work when there is nothing
  /// to export.
  pub fn render(self, submissions: &[Submission], ctx: &ExportContext) -> Result<Artifact> {
    if submissions.is_empty() {
      return Err(Error::Empty);
    }
    match self {
      Self::Csv => csv_file::render(submissions, ctx),
      Self::Html => Ok(html::render(submissions, ctx)),
      Self::Xlsx => workbook::render(submissions, ctx),
    }
  }

  pub fn extension(self) -> &'static str {
    match self {
      Self::Csv => "csv",
      Self::Html => "html",
      Self::Xlsx => "xlsx",
    }
  }
}

impl fmt::Display for ExportFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.extension())
  }
}

impl FromStr for ExportFormat {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "csv" => Ok(Self::Csv),
      "html" => Ok(Self::Html),
      "xlsx" => Ok(Self::Xlsx),
      other => Err(Error::UnknownFormat(other.to_owned())),
    }
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use chrono::{FixedOffset, TimeZone, Utc};
  use panitia_core::submission::Submission;
  use uuid::Uuid;

  use crate::ExportContext;

  pub fn ctx() -> ExportContext {
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    ExportContext::at(wib.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
  }

  pub fn sub(name: &str, department: Option<&str>, position: Option<&str>) -> Submission {
    Submission {
      id:            Uuid::new_v4(),
      employee_id:   name.to_lowercase(),
      employee_name: name.into(),
      full_name:     format!("{name} Santoso"),
      sector:        department.map(|_| "Umum".into()),
      department:    department.map(Into::into),
      division:      department.map(|_| "Gudang".into()),
      position:      position.map(Into::into),
      instagram:     format!("{}_ig", name.to_lowercase()),
      birth_place:   "Jakarta".into(),
      birth_date:    "2000-01-01".into(),
      quotes:        "Semangat!".into(),
      program_studi: "Program Studi Informatika".into(),
      created_at:    Utc.with_ymd_and_hms(2024, 4, 30, 8, 5, 9).unwrap(),
    }
  }

  /// Two "Logistik" rows and one "PM" row.
  pub fn mixed() -> Vec<Submission> {
    vec![
      sub("Budi", Some("Logistik"), None),
      sub("Sari", None, Some("PM")),
      sub("Andi", Some("Logistik"), None),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_format_refuses_an_empty_set() {
    let ctx = fixtures::ctx();
    for format in [ExportFormat::Csv, ExportFormat::Html, ExportFormat::Xlsx] {
      assert!(matches!(format.render(&[], &ctx), Err(Error::Empty)), "{format}");
    }
  }

  #[test]
  fn filenames_carry_the_export_date() {
    let ctx = fixtures::ctx();
    let rows = fixtures::mixed();
    let a = ExportFormat::Csv.render(&rows, &ctx).unwrap();
    assert_eq!(a.filename, "Form_Panitia_Per_Departemen_2024-05-01.csv");
    assert!(!a.inline);
  }

  #[test]
  fn format_parses_case_insensitively() {
    assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
    assert!("pdf".parse::<ExportFormat>().is_err());
  }
}
