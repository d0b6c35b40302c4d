//! Error types for `panitia-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to read employee directory {path}: {source}")]
  DirectoryRead {
    path:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("employee {0:?} has neither a position nor a department")]
  MissingPlacement(String),

  #[error("duplicate employee id {0:?}")]
  DuplicateEmployee(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
