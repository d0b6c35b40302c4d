//! Error types for the export renderers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Shown to the admin as-is; no file is produced.
  #[error("Tidak ada data untuk didownload")]
  Empty,

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("workbook error: {0}")]
  Xlsx(#[from] rust_xlsxwriter::XlsxError),

  #[error("unknown export format: {0:?}")]
  UnknownFormat(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
