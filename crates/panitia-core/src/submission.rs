//! Submissions — one person's supplementary answers plus an organisational
//! snapshot taken from their directory entry.
//!
//! Submissions are append-only: created once by the writer, never updated or
//! deleted, read many times by the admin views.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::employee::Employee;

// ─── Study programs ──────────────────────────────────────────────────────────

/// Sentinel option meaning "my study program is not listed".
pub const PROGRAM_STUDI_OTHER: &str = "Lainnya";

/// Options offered by the form, sentinel last.
pub const PROGRAM_STUDI: &[&str] = &[
  "Program Studi Ilmu Politik",
  "Program Studi Hubungan Internasional",
  "Program Studi Administrasi Publik",
  "Program Studi Sosiologi",
  "Program Studi Ilmu Komunikasi",
  "Program Studi Hukum",
  "Program Studi Sastra Inggris",
  "Program Studi Sastra Indonesia",
  "Program Studi Sastra Jepang",
  "Program Studi Bahasa Korea",
  "Program Studi Manajemen",
  "Program Studi Akuntansi",
  "Program Studi Pariwisata",
  "Program Studi Bisnis Digital",
  "Program Studi Fisika",
  "Program Studi Teknik Elektro",
  "Program Studi Teknik Mesin",
  "Program Studi Teknik Fisika",
  "Program Studi Biologi",
  "Program Studi Agroteknologi",
  "Program Studi Sistem Informasi",
  "Program Studi Informatika",
  "Program Studi Keperawatan",
  "Program Studi Kebidanan",
  "Program Studi Pendidikan Profesi Ners",
  "Program Studi Pendidikan Profesi Bidan",
  PROGRAM_STUDI_OTHER,
];

/// Format accepted for `birth_date`.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Persisted record ────────────────────────────────────────────────────────

/// A stored row of the `form_submissions` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
  pub id:            Uuid,
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
  /// Server-assigned; never changes after creation.
  pub created_at:    DateTime<Utc>,
}

// ─── NewSubmission ───────────────────────────────────────────────────────────

/// Input to [`crate::store::SubmissionStore::insert`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
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
}

/// The user-entered half of a submission, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFields {
  pub instagram:     String,
  pub birth_place:   String,
  pub birth_date:    NaiveDate,
  pub quotes:        String,
  pub program_studi: String,
}

impl NewSubmission {
  /// Copy `employee`'s identity and placement as they are right now.
  pub fn snapshot(employee: &Employee, fields: SubmissionFields) -> Self {
    Self {
      employee_id:   employee.id.clone(),
      employee_name: employee.name.clone(),
      full_name:     employee.full_name.clone(),
      sector:        employee.sector().map(str::to_owned),
      department:    employee.department().map(str::to_owned),
      division:      employee.division().map(str::to_owned),
      position:      employee.position().map(str::to_owned),
      instagram:     fields.instagram,
      birth_place:   fields.birth_place,
      birth_date:    fields.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
      quotes:        fields.quotes,
      program_studi: fields.program_studi,
    }
  }

  /// Attach the store-assigned identity.
  pub fn into_submission(self, id: Uuid, created_at: DateTime<Utc>) -> Submission {
    Submission {
      id,
      employee_id: self.employee_id,
      employee_name: self.employee_name,
      full_name: self.full_name,
      sector: self.sector,
      department: self.department,
      division: self.division,
      position: self.position,
      instagram: self.instagram,
      birth_place: self.birth_place,
      birth_date: self.birth_date,
      quotes: self.quotes,
      program_studi: self.program_studi,
      created_at,
    }
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Rejections raised before any store call. Messages are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Silakan pilih karyawan terlebih dahulu")]
  NoEmployee,

  #[error("Kolom {0} wajib diisi")]
  MissingField(&'static str),

  #[error("Tanggal lahir harus berformat YYYY-MM-DD")]
  InvalidBirthDate,

  #[error("Program studi tidak dikenal: {0}")]
  UnknownProgramStudi(String),

  #[error("Silakan isi program studi lainnya")]
  MissingOtherProgramStudi,
}

/// The in-progress form contents of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
  pub employee:            Option<Employee>,
  pub instagram:           String,
  pub birth_place:         String,
  pub birth_date:          String,
  pub quotes:              String,
  pub program_studi:       String,
  /// Free text used when `program_studi` is [`PROGRAM_STUDI_OTHER`].
  pub program_studi_other: String,
}

impl Draft {
  /// Check every precondition and build the row to insert.
  pub fn validate(&self) -> Result<NewSubmission, ValidationError> {
    let employee = self.employee.as_ref().ok_or(ValidationError::NoEmployee)?;

    let program_studi = required("program studi", &self.program_studi)?;
    let program_studi = if program_studi == PROGRAM_STUDI_OTHER {
      let other = self.program_studi_other.trim();
      if other.is_empty() {
        return Err(ValidationError::MissingOtherProgramStudi);
      }
      other.to_owned()
    } else if PROGRAM_STUDI.contains(&program_studi) {
      program_studi.to_owned()
    } else {
      return Err(ValidationError::UnknownProgramStudi(program_studi.to_owned()));
    };

    let instagram = required("instagram", &self.instagram)?;
    let instagram = instagram_handle(instagram);
    if instagram.is_empty() {
      return Err(ValidationError::MissingField("instagram"));
    }

    let birth_place = required("tempat lahir", &self.birth_place)?;
    let birth_date = required("tanggal lahir", &self.birth_date)?;
    let birth_date = NaiveDate::parse_from_str(birth_date, BIRTH_DATE_FORMAT)
      .map_err(|_| ValidationError::InvalidBirthDate)?;
    let quotes = required("quotes", &self.quotes)?;

    Ok(NewSubmission::snapshot(employee, SubmissionFields {
      instagram: instagram.to_owned(),
      birth_place: birth_place.to_owned(),
      birth_date,
      quotes: quotes.to_owned(),
      program_studi,
    }))
  }
}

/// The handle without any leading `@`s, as stored and as shown.
pub fn instagram_handle(raw: &str) -> &str { raw.trim().trim_start_matches('@').trim() }

fn required<'a>(
  name: &'static str,
  value: &'a str,
) -> Result<&'a str, ValidationError> {
  let v = value.trim();
  if v.is_empty() { Err(ValidationError::MissingField(name)) } else { Ok(v) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::employee::Placement;

  fn budi() -> Employee {
    Employee {
      id:        "1".into(),
      name:      "Budi".into(),
      full_name: "Budi Santoso".into(),
      placement: Placement::Staff {
        sector:     "Umum".into(),
        department: "Operasional".into(),
        division:   "Logistik".into(),
      },
    }
  }

  fn filled() -> Draft {
    Draft {
      employee:            Some(budi()),
      instagram:           "budi123".into(),
      birth_place:         "Jakarta".into(),
      birth_date:          "2000-01-01".into(),
      quotes:              "Semangat!".into(),
      program_studi:       "Program Studi Informatika".into(),
      program_studi_other: String::new(),
    }
  }

  #[test]
  fn valid_draft_snapshots_employee() {
    let s = filled().validate().unwrap();
    assert_eq!(s.employee_id, "1");
    assert_eq!(s.employee_name, "Budi");
    assert_eq!(s.full_name, "Budi Santoso");
    assert_eq!(s.sector.as_deref(), Some("Umum"));
    assert_eq!(s.department.as_deref(), Some("Operasional"));
    assert_eq!(s.division.as_deref(), Some("Logistik"));
    assert_eq!(s.position, None);
    assert_eq!(s.birth_date, "2000-01-01");
    assert_eq!(s.program_studi, "Program Studi Informatika");
  }

  #[test]
  fn missing_employee_is_rejected_first() {
    let mut d = Draft::default();
    d.instagram = "x".into();
    assert_eq!(d.validate(), Err(ValidationError::NoEmployee));
  }

  #[test]
  fn blank_fields_are_rejected() {
    let mut d = filled();
    d.quotes = "   ".into();
    assert_eq!(d.validate(), Err(ValidationError::MissingField("quotes")));
  }

  #[test]
  fn bad_birth_date_is_rejected() {
    let mut d = filled();
    d.birth_date = "01/01/2000".into();
    assert_eq!(d.validate(), Err(ValidationError::InvalidBirthDate));
  }

  #[test]
  fn other_program_studi_requires_free_text() {
    let mut d = filled();
    d.program_studi = PROGRAM_STUDI_OTHER.into();
    assert_eq!(d.validate(), Err(ValidationError::MissingOtherProgramStudi));

    d.program_studi_other = "  Program Studi Arsitektur ".into();
    let s = d.validate().unwrap();
    assert_eq!(s.program_studi, "Program Studi Arsitektur");
  }

  #[test]
  fn unknown_program_studi_is_rejected() {
    let mut d = filled();
    d.program_studi = "Program Studi Alkimia".into();
    assert!(matches!(d.validate(), Err(ValidationError::UnknownProgramStudi(_))));
  }

  #[test]
  fn instagram_at_prefix_is_stripped() {
    let mut d = filled();
    d.instagram = "@budi123".into();
    assert_eq!(d.validate().unwrap().instagram, "budi123");

    d.instagram = " @@budi123".into();
    assert_eq!(d.validate().unwrap().instagram, "budi123");

    d.instagram = "@@".into();
    assert_eq!(d.validate(), Err(ValidationError::MissingField("instagram")));
  }

  #[test]
  fn snapshot_does_not_follow_later_directory_changes() {
    let mut employee = budi();
    let s = NewSubmission::snapshot(&employee, SubmissionFields {
      instagram:     "budi123".into(),
      birth_place:   "Jakarta".into(),
      birth_date:    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
      quotes:        "Semangat!".into(),
      program_studi: "Program Studi Informatika".into(),
    });
    employee.placement = Placement::Leadership { position: "PM".into() };
    assert_eq!(employee.position(), Some("PM"));
    assert_eq!(s.department.as_deref(), Some("Operasional"));
    assert_eq!(s.position, None);
  }
}
