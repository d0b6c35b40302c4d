//! [`SqliteStore`] — the SQLite implementation of [`SubmissionStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use uuid::Uuid;

use panitia_core::{
  store::SubmissionStore,
  submission::{NewSubmission, Submission},
};

use crate::{
  Error, Result,
  encode::{COLUMNS, RawSubmission, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A submission store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored rows.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM form_submissions", [], |r| {
          r.get(0)
        })?)
      })
      .await?;
    Ok(n as usize)
  }
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, input: NewSubmission) -> Result<Submission> {
    // Truncated to the stored precision so the returned row equals a re-read.
    let submission = input.into_submission(Uuid::new_v4(), Utc::now().trunc_subsecs(6));

    let id_str = encode_uuid(submission.id);
    let at_str = encode_dt(submission.created_at);
    let row    = submission.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO form_submissions (
             id, employee_id, employee_name, full_name,
             sector, department, division, position,
             instagram, birth_place, birth_date, quotes, program_studi,
             created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            id_str,
            row.employee_id,
            row.employee_name,
            row.full_name,
            row.sector,
            row.department,
            row.division,
            row.position,
            row.instagram,
            row.birth_place,
            row.birth_date,
            row.quotes,
            row.program_studi,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %submission.id, employee_id = %submission.employee_id, "submission stored");
    Ok(submission)
  }

  async fn list_recent(&self) -> Result<Vec<Submission>> {
    let raws: Vec<RawSubmission> = self
      .conn
      .call(|conn| {
        // rowid breaks ties between rows recorded in the same microsecond.
        let sql = format!(
          "SELECT {COLUMNS} FROM form_submissions
           ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawSubmission::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSubmission::into_submission).collect()
  }
}
