//! The `SubmissionStore` trait.
//!
//! Implemented by storage backends (e.g. `panitia-store-sqlite`). Higher
//! layers (`panitia-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::submission::{NewSubmission, Submission};

/// Abstraction over the persisted `form_submissions` collection.
///
/// The collection is append-only: rows are inserted once and never updated
/// or deleted through this trait.
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Append one row. The store assigns `id` and `created_at`; the write is
  /// atomic, so a failure leaves nothing behind.
  fn insert(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Every row, newest `created_at` first.
  fn list_recent(
    &self,
  ) -> impl Future<Output = Result<Vec<Submission>, Self::Error>> + Send + '_;
}

#[cfg(test)]
mod tests {
  use super::*;

  // Only needs to compile: handlers spawn these futures across threads.
  #[allow(dead_code)]
  fn futures_are_send<S: SubmissionStore>(store: &S, input: NewSubmission) {
    fn is_send<T: Send>(_: T) {}
    is_send(store.insert(input));
    is_send(store.list_recent());
  }
}
