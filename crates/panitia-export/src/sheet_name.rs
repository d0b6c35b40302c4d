//! Worksheet naming rules.
//!
//! A worksheet name may not contain `: \ / ? * [ ]`, may not begin or end
//! with an apostrophe, may not be empty, and holds at most 31 characters.
//! Names are compared case-insensitively, so uniqueness is too.

use std::collections::HashSet;

/// Maximum worksheet name length.
pub const MAX_LEN: usize = 31;

const ILLEGAL: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// Used when a label sanitises down to nothing.
const FALLBACK: &str = "Sheet";

/// Make `label` a legal worksheet name: illegal characters become `_`,
/// surrounding apostrophes are dropped, and the result is cut to
/// [`MAX_LEN`] characters.
pub fn sanitize_sheet_name(label: &str) -> String {
  let replaced: String = label
    .chars()
    .map(|c| if ILLEGAL.contains(&c) || c.is_control() { '_' } else { c })
    .collect();
  let trimmed = replaced.trim().trim_matches('\'');
  let truncated: String = trimmed.chars().take(MAX_LEN).collect();
  // Truncation can expose a trailing apostrophe.
  let cleaned = truncated.trim_end_matches('\'').trim_end();
  if cleaned.is_empty() {
    FALLBACK.to_owned()
  } else {
    cleaned.to_owned()
  }
}

/// Hands out sanitised names that are unique within one workbook.
#[derive(Debug)]
pub struct SheetNamer {
  used: HashSet<String>,
}

impl Default for SheetNamer {
  fn default() -> Self {
    // Reserved by Excel itself.
    Self { used: HashSet::from(["history".to_owned()]) }
  }
}

impl SheetNamer {
  pub fn new() -> Self { Self::default() }

  /// A legal name for `label` not handed out before; collisions get a
  /// ` (2)`, ` (3)`, … suffix inside the length limit.
  pub fn name(&mut self, label: &str) -> String {
    let base = sanitize_sheet_name(label);
    if self.used.insert(base.to_lowercase()) {
      return base;
    }
    (2..)
      .map(|n| {
        let suffix = format!(" ({n})");
        let room = MAX_LEN - suffix.chars().count();
        let stem: String = base.chars().take(room).collect();
        format!("{}{suffix}", stem.trim_end())
      })
      .find(|candidate| self.used.insert(candidate.to_lowercase()))
      .unwrap_or(base)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn is_legal(name: &str) -> bool {
    !name.is_empty()
      && name.chars().count() <= MAX_LEN
      && !name.chars().any(|c| ILLEGAL.contains(&c))
      && !name.starts_with('\'')
      && !name.ends_with('\'')
  }

  #[test]
  fn plain_labels_pass_through() {
    assert_eq!(sanitize_sheet_name("Logistik"), "Logistik");
    assert_eq!(sanitize_sheet_name("PM"), "PM");
  }

  #[test]
  fn illegal_characters_are_replaced() {
    assert_eq!(sanitize_sheet_name("R&D: Riset/Dev?"), "R&D_ Riset_Dev_");
    assert_eq!(sanitize_sheet_name(r"a\b*c[d]"), "a_b_c_d_");
  }

  #[test]
  fn long_labels_are_truncated() {
    let label = "Divisi Pengembangan Sumber Daya Manusia";
    let name = sanitize_sheet_name(label);
    assert_eq!(name, "Divisi Pengembangan Sumber Daya");
    assert_eq!(name.chars().count(), MAX_LEN);

    // A cut that lands on a space does not leave it dangling.
    let name = sanitize_sheet_name("Departemen Hubungan Masyarakat dan Protokoler");
    assert_eq!(name, "Departemen Hubungan Masyarakat");
  }

  #[test]
  fn apostrophes_and_empties() {
    assert_eq!(sanitize_sheet_name("'Acara'"), "Acara");
    assert_eq!(sanitize_sheet_name(""), "Sheet");
    assert_eq!(sanitize_sheet_name("''"), "Sheet");
  }

  #[test]
  fn fixture_labels_stay_legal_and_distinct() {
    let labels = [
      "Logistik",
      "PM",
      "DPM",
      "Unknown",
      "Acara: Pembukaan / Penutupan",
      "Konsumsi [Pagi]",
      "Keamanan*",
      r"Dokumentasi\Publikasi?",
      "Departemen Hubungan Masyarakat dan Protokoler",
      "Departemen Hubungan Masyarakat dan Sponsorship",
      "history",
    ];
    let mut namer = SheetNamer::new();
    let names: Vec<String> = labels.iter().map(|l| namer.name(l)).collect();

    assert!(names.iter().all(|n| is_legal(n)), "{names:?}");
    let distinct: HashSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
    assert_eq!(distinct.len(), names.len(), "{names:?}");
  }

  #[test]
  fn collisions_get_numbered_within_limit() {
    let mut namer = SheetNamer::new();
    let a = namer.name("Departemen Hubungan Masyarakat dan Protokoler");
    let b = namer.name("Departemen Hubungan Masyarakat dan Sponsorship");
    assert_ne!(a, b);
    assert!(b.ends_with(" (2)"));
    assert!(b.chars().count() <= MAX_LEN);

    assert_eq!(namer.name("logistik"), "logistik");
    assert_eq!(namer.name("LOGISTIK"), "LOGISTIK (2)");
  }
}
