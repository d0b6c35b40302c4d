//! Per-session state of the public form.
//!
//! Each interactive session owns one [`FormState`] and passes it through its
//! UI layer; nothing here is shared between sessions.

use thiserror::Error;

use crate::{
  directory::{Directory, MIN_QUERY_LEN},
  employee::Employee,
  submission::{Draft, NewSubmission, ValidationError},
};

/// Why [`FormState::begin_submit`] refused to start a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
  #[error("Form sedang dikirim")]
  InFlight,

  #[error(transparent)]
  Invalid(#[from] ValidationError),
}

/// Search box, lookup results, draft and the in-flight flag.
#[derive(Debug, Clone, Default)]
pub struct FormState {
  pub query:        String,
  pub results:      Vec<Employee>,
  /// Whether the result panel is visible.
  pub show_results: bool,
  pub draft:        Draft,
  /// Set while a write is outstanding; the submit control is disabled.
  pub submitting:   bool,
}

impl FormState {
  pub fn new() -> Self { Self::default() }

  /// Replace the search text and recompute the lookup.
  pub fn set_query(&mut self, directory: &Directory, query: impl Into<String>) {
    let query = query.into();
    let results = directory.search(&query).into_iter().cloned().collect();
    self.set_results(query, results);
  }

  /// Replace the search text with results computed elsewhere, e.g. by a
  /// remote lookup. Short queries still show nothing.
  pub fn set_results(&mut self, query: impl Into<String>, results: Vec<Employee>) {
    self.query = query.into();
    self.results = if self.query.chars().count() < MIN_QUERY_LEN {
      Vec::new()
    } else {
      results
    };
    self.show_results = !self.results.is_empty();
  }

  /// Pick `employee` as the person filling in the form.
  pub fn select(&mut self, employee: Employee) {
    self.query = employee.name.clone();
    self.show_results = false;
    self.draft.employee = Some(employee);
  }

  /// Pick the `index`-th visible result, if any.
  pub fn select_result(&mut self, index: usize) -> bool {
    match self.results.get(index).cloned() {
      Some(e) => {
        self.select(e);
        true
      }
      None => false,
    }
  }

  pub fn can_submit(&self) -> bool {
    self.draft.employee.is_some() && !self.submitting
  }

  /// Validate the draft and mark a write as in flight.
  ///
  /// Nothing is mutated when validation fails.
  pub fn begin_submit(&mut self) -> Result<NewSubmission, SubmitError> {
    if self.submitting {
      return Err(SubmitError::InFlight);
    }
    let row = self.draft.validate()?;
    self.submitting = true;
    Ok(row)
  }

  /// Record the outcome of the write started by [`Self::begin_submit`].
  ///
  /// On success every transient field is cleared; on failure the draft is
  /// left as it was so the user can retry.
  pub fn finish_submit(&mut self, succeeded: bool) {
    self.submitting = false;
    if succeeded {
      *self = Self::default();
    }
  }
}
