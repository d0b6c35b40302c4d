//! Grouping and counting over a fetched submission set.
//!
//! Nothing here is persisted: every view is a pure function of the rows the
//! admin fetched last.

use std::{cmp::Ordering, collections::HashMap};

use chrono::{DateTime, Utc};
use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::submission::Submission;

/// Label for rows that carry neither a position nor a department.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// How many rows the dashboard's "recent" table shows.
pub const RECENT_LIMIT: usize = 20;

/// The bucket a submission is counted under: position, else department,
/// else [`UNKNOWN_GROUP`].
pub fn group_key(s: &Submission) -> &str {
  [s.position.as_deref(), s.department.as_deref()]
    .into_iter()
    .flatten()
    .find(|k| !k.is_empty())
    .unwrap_or(UNKNOWN_GROUP)
}

// ─── Stats view ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentStat {
  pub key:   String,
  pub count: usize,
}

/// One entry per group, largest first; ties keep first-seen order.
pub fn stats_view(submissions: &[Submission]) -> Vec<DepartmentStat> {
  let mut index: HashMap<&str, usize> = HashMap::new();
  let mut stats: Vec<DepartmentStat> = Vec::new();

  for s in submissions {
    let key = group_key(s);
    match index.get(key) {
      Some(&i) => stats[i].count += 1,
      None => {
        index.insert(key, stats.len());
        stats.push(DepartmentStat { key: key.to_owned(), count: 1 });
      }
    }
  }

  // `sort_by` is stable, which preserves first-seen order among ties.
  stats.sort_by(|a, b| b.count.cmp(&a.count));
  stats
}

/// `count / total * 100`, or `0.0` when there is nothing to divide by.
pub fn percentage(count: usize, total: usize) -> f64 {
  if total == 0 {
    0.0
  } else {
    count as f64 / total as f64 * 100.0
  }
}

// ─── Export view ─────────────────────────────────────────────────────────────

/// A group of submissions sharing one [`group_key`].
#[derive(Debug, Clone)]
pub struct Group<'a> {
  pub key:     &'a str,
  pub members: Vec<&'a Submission>,
}

/// Groups in alphabetical key order; members keep their fetch order.
pub fn export_view(submissions: &[Submission]) -> Vec<Group<'_>> {
  let mut groups: Vec<Group<'_>> = Vec::new();
  let mut index: HashMap<&str, usize> = HashMap::new();

  for s in submissions {
    let key = group_key(s);
    let i = *index.entry(key).or_insert_with(|| {
      groups.push(Group { key, members: Vec::new() });
      groups.len() - 1
    });
    groups[i].members.push(s);
  }

  let mut collator = Collator::default();
  groups.sort_by(|a, b| collator.collate(a.key, b.key));
  groups
}

/// Unicode collation (CLDR root order): accents and case only break ties,
/// so `Éxito` sorts between `Acara` and `Zeta`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering { Collator::default().collate(a, b) }

// ─── Dashboard ───────────────────────────────────────────────────────────────

/// A stats entry with its share of the total, for the progress bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatShare {
  pub key:        String,
  pub count:      usize,
  pub percentage: f64,
}

/// Everything the admin dashboard renders after a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
  pub total_submissions: usize,
  pub total_groups:      usize,
  /// `created_at` of the newest row, if any.
  pub last_updated:      Option<DateTime<Utc>>,
  pub stats:             Vec<StatShare>,
  /// The newest [`RECENT_LIMIT`] rows.
  pub recent:            Vec<Submission>,
}

impl Dashboard {
  /// Build from rows already ordered newest first.
  pub fn build(submissions: &[Submission]) -> Self {
    let total = submissions.len();
    let stats: Vec<StatShare> = stats_view(submissions)
      .into_iter()
      .map(|s| StatShare {
        percentage: percentage(s.count, total),
        key:        s.key,
        count:      s.count,
      })
      .collect();

    Self {
      total_submissions: total,
      total_groups:      stats.len(),
      last_updated:      submissions.first().map(|s| s.created_at),
      stats,
      recent:            submissions.iter().take(RECENT_LIMIT).cloned().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use uuid::Uuid;

  fn sub(department: Option<&str>, position: Option<&str>) -> Submission {
    Submission {
      id:            Uuid::new_v4(),
      employee_id:   "1".into(),
      employee_name: "Budi".into(),
      full_name:     "Budi Santoso".into(),
      sector:        None,
      department:    department.map(Into::into),
      division:      None,
      position:      position.map(Into::into),
      instagram:     "budi".into(),
      birth_place:   "Jakarta".into(),
      birth_date:    "2000-01-01".into(),
      quotes:        "q".into(),
      program_studi: "Program Studi Informatika".into(),
      created_at:    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
    }
  }

  #[test]
  fn key_prefers_position_then_department_then_unknown() {
    assert_eq!(group_key(&sub(Some("Logistik"), Some("PM"))), "PM");
    assert_eq!(group_key(&sub(Some("Logistik"), None)), "Logistik");
    assert_eq!(group_key(&sub(Some("Logistik"), Some(""))), "Logistik");
    assert_eq!(group_key(&sub(None, None)), UNKNOWN_GROUP);
    assert_eq!(group_key(&sub(Some(""), None)), UNKNOWN_GROUP);
  }

  #[test]
  fn two_logistik_one_pm() {
    let rows = vec![
      sub(Some("Logistik"), None),
      sub(None, Some("PM")),
      sub(Some("Logistik"), None),
    ];
    let stats = stats_view(&rows);
    assert_eq!(stats, vec![
      DepartmentStat { key: "Logistik".into(), count: 2 },
      DepartmentStat { key: "PM".into(), count: 1 },
    ]);

    let keys: Vec<_> = export_view(&rows).iter().map(|g| g.key).collect();
    assert_eq!(keys, ["Logistik", "PM"]);
  }

  #[test]
  fn ties_keep_first_seen_order() {
    let rows = vec![
      sub(Some("Zeta"), None),
      sub(Some("Alpha"), None),
      sub(Some("Mid"), None),
    ];
    let keys: Vec<_> = stats_view(&rows).into_iter().map(|s| s.key).collect();
    assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
  }

  #[test]
  fn counts_sum_to_total() {
    let rows: Vec<_> = (0..37)
      .map(|i| match i % 4 {
        0 => sub(Some("Keuangan"), None),
        1 => sub(None, Some("DPM")),
        2 => sub(None, None),
        _ => sub(Some("IT"), Some("")),
      })
      .collect();
    let total: usize = stats_view(&rows).iter().map(|s| s.count).sum();
    assert_eq!(total, rows.len());

    let exported: usize = export_view(&rows).iter().map(|g| g.members.len()).sum();
    assert_eq!(exported, rows.len());
  }

  #[test]
  fn export_order_ignores_case() {
    let rows = vec![
      sub(Some("keuangan"), None),
      sub(Some("IT"), None),
      sub(Some("Acara"), None),
    ];
    let keys: Vec<_> = export_view(&rows).iter().map(|g| g.key).collect();
    assert_eq!(keys, ["Acara", "IT", "keuangan"]);
  }

  #[test]
  fn accented_keys_sort_with_their_base_letter() {
    let mut keys = ["Zeta", "Éxito", "Acara"];
    keys.sort_by(|a, b| locale_cmp(a, b));
    assert_eq!(keys, ["Acara", "Éxito", "Zeta"]);

    let rows = vec![
      sub(Some("Zeta"), None),
      sub(Some("Éxito"), None),
      sub(Some("Ekonomi"), None),
      sub(Some("Acara"), None),
    ];
    let keys: Vec<_> = export_view(&rows).iter().map(|g| g.key).collect();
    assert_eq!(keys, ["Acara", "Ekonomi", "Éxito", "Zeta"]);
  }

  #[test]
  fn percentage_never_divides_by_zero() {
    assert_eq!(percentage(0, 0), 0.0);
    assert_eq!(percentage(1, 4), 25.0);
  }

  #[test]
  fn empty_dashboard() {
    let d = Dashboard::build(&[]);
    assert_eq!(d.total_submissions, 0);
    assert_eq!(d.total_groups, 0);
    assert!(d.stats.is_empty());
    assert!(d.last_updated.is_none());
  }

  #[test]
  fn dashboard_limits_recent_rows() {
    let rows: Vec<_> = (0..25).map(|_| sub(Some("IT"), None)).collect();
    let d = Dashboard::build(&rows);
    assert_eq!(d.recent.len(), RECENT_LIMIT);
    assert_eq!(d.stats[0].percentage, 100.0);
    assert_eq!(d.last_updated, Some(rows[0].created_at));
  }
}
