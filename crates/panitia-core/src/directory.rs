//! The static employee directory and name lookup.
//!
//! Loaded once at startup and never mutated; every session searches the same
//! shared copy.

use std::{collections::HashSet, path::Path};

use crate::{Error, Result, employee::Employee};

/// Queries shorter than this (in characters) count as "no search yet".
pub const MIN_QUERY_LEN: usize = 2;

/// Immutable, ordered list of employees.
#[derive(Debug, Clone, Default)]
pub struct Directory {
  employees: Vec<Employee>,
}

impl Directory {
  /// Build a directory from already-parsed records, rejecting duplicate ids.
  pub fn new(employees: Vec<Employee>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(employees.len());
    for e in &employees {
      if !seen.insert(e.id.as_str()) {
        return Err(Error::DuplicateEmployee(e.id.clone()));
      }
    }
    Ok(Self { employees })
  }

  /// Parse a JSON array of employee records.
  pub fn from_json(json: &str) -> Result<Self> {
    let employees: Vec<Employee> = serde_json::from_str(json)?;
    Self::new(employees)
  }

  /// Read and parse the dataset at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| Error::DirectoryRead {
      path: path.display().to_string(),
      source,
    })?;
    Self::from_json(&raw)
  }

  pub fn get(&self, id: &str) -> Option<&Employee> {
    self.employees.iter().find(|e| e.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Employee> { self.employees.iter() }

  pub fn len(&self) -> usize { self.employees.len() }

  pub fn is_empty(&self) -> bool { self.employees.is_empty() }

  /// Employees whose short or full name contains `query`, ignoring case,
  /// in directory order. Empty for queries under [`MIN_QUERY_LEN`].
  pub fn search(&self, query: &str) -> Vec<&Employee> {
    if query.chars().count() < MIN_QUERY_LEN {
      return Vec::new();
    }
    let needle = query.to_lowercase();
    self
      .employees
      .iter()
      .filter(|e| matches_lowered(e, &needle))
      .collect()
  }
}

/// Case-insensitive substring test over `name` and `full_name`.
pub fn matches(employee: &Employee, query: &str) -> bool {
  matches_lowered(employee, &query.to_lowercase())
}

fn matches_lowered(employee: &Employee, needle: &str) -> bool {
  employee.name.to_lowercase().contains(needle)
    || employee.full_name.to_lowercase().contains(needle)
}
