//! The fixed column set shared by every export format.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use panitia_core::submission::Submission;

/// Column headers, in output order.
pub const HEADERS: [&str; 13] = [
  "No",
  "Nama",
  "Nama Lengkap",
  "Posisi",
  "Sektor",
  "Departemen",
  "Divisi",
  "Program Studi",
  "Instagram",
  "Tempat Lahir",
  "Tanggal Lahir",
  "Quotes",
  "Tanggal Input",
];

/// Workbook column widths, one per header.
pub const COLUMN_WIDTHS: [f64; 13] = [
  5.0, 15.0, 25.0, 12.0, 15.0, 20.0, 20.0, 30.0, 18.0, 15.0, 14.0, 40.0, 20.0,
];

/// Placeholder for organisational fields a row does not carry.
const ABSENT: &str = "-";

/// The cells of one data row; `number` is 1-based within its group.
pub fn cells(number: usize, s: &Submission, offset: FixedOffset) -> [String; 13] {
  [
    number.to_string(),
    s.employee_name.clone(),
    s.full_name.clone(),
    or_absent(&s.position),
    or_absent(&s.sector),
    or_absent(&s.department),
    or_absent(&s.division),
    s.program_studi.clone(),
    s.instagram.clone(),
    s.birth_place.clone(),
    s.birth_date.clone(),
    s.quotes.clone(),
    timestamp(s.created_at, offset),
  ]
}

fn or_absent(v: &Option<String>) -> String {
  match v.as_deref() {
    Some(s) if !s.is_empty() => s.to_owned(),
    _ => ABSENT.to_owned(),
  }
}

/// `d/m/yyyy, HH.MM.SS`, the id-ID short form.
pub fn timestamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
  at.with_timezone(&offset)
    .format("%-d/%-m/%Y, %H.%M.%S")
    .to_string()
}

/// Label for a group heading, e.g. `Logistik (2 orang)`.
pub fn group_label(key: &str, count: usize) -> String {
  format!("{key} ({count} orang)")
}

const DAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

const MONTHS: [&str; 12] = [
  "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus",
  "September", "Oktober", "November", "Desember",
];

/// Full Indonesian date, e.g. `Rabu, 01 Mei 2024`.
pub fn long_date(at: DateTime<FixedOffset>) -> String {
  let day = DAYS[at.weekday().num_days_from_monday() as usize];
  let month = MONTHS[at.month0() as usize];
  format!("{day}, {:02} {month} {}", at.day(), at.year())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures;
  use chrono::TimeZone;

  #[test]
  fn staff_row_marks_missing_position() {
    let s = fixtures::sub("Budi", Some("Logistik"), None);
    let row = cells(1, &s, *fixtures::ctx().generated_at.offset());
    assert_eq!(row[0], "1");
    assert_eq!(row[3], "-");
    assert_eq!(row[5], "Logistik");
    // 08:05:09 UTC rendered at +07:00.
    assert_eq!(row[12], "30/4/2024, 15.05.09");
  }

  #[test]
  fn leadership_row_marks_missing_placement() {
    let s = fixtures::sub("Sari", None, Some("PM"));
    let row = cells(2, &s, FixedOffset::east_opt(0).unwrap());
    assert_eq!(&row[3..7], ["PM", "-", "-", "-"]);
  }

  #[test]
  fn long_date_in_indonesian() {
    let wib = FixedOffset::east_opt(7 * 3600).unwrap();
    let at = wib.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    assert_eq!(long_date(at), "Rabu, 01 Mei 2024");
  }
}
