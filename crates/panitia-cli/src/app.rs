//! Application state machine and event dispatcher.

use std::{path::PathBuf, sync::Arc};

use chrono::FixedOffset;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use panitia_core::{
  form::FormState,
  stats::Dashboard,
  submission::{PROGRAM_STUDI_OTHER, Submission},
};
use panitia_export::{Error as ExportError, ExportContext, ExportFormat};

use crate::{
  client::{ApiClient, ClientError},
  session::SessionFile,
};

const SUBMITTED: &str = "Form berhasil dikirim!";
const WRONG_PASSWORD: &str = "Password salah!";

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The public form.
  Form,
  /// Admin secret prompt.
  Login,
  /// Stats, recent rows and exports.
  Dashboard,
}

/// Keyboard focus within the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Search,
  Instagram,
  BirthPlace,
  BirthDate,
  Quotes,
  ProgramStudi,
  ProgramStudiOther,
}

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Field::Search => "Cari Nama",
      Field::Instagram => "Instagram",
      Field::BirthPlace => "Tempat Lahir",
      Field::BirthDate => "Tanggal Lahir (YYYY-MM-DD)",
      Field::Quotes => "Quotes",
      Field::ProgramStudi => "Program Studi",
      Field::ProgramStudiOther => "Program Studi Lainnya",
    }
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// This session's form.
  pub form: FormState,

  pub field: Field,

  /// Cursor within the lookup results.
  pub result_cursor: usize,

  /// Study-program options as served by the API, sentinel last.
  pub program_options: Vec<String>,

  /// Text typed into the login prompt.
  pub password_input: String,

  /// The accepted admin secret, sent with every admin request.
  pub admin_password: Option<String>,

  /// Rows from the last fetch, newest first. Exports render exactly these.
  pub submissions: Vec<Submission>,

  pub dashboard: Option<Dashboard>,

  /// Scroll offset within the recent-rows table.
  pub recent_scroll: usize,

  /// Where downloaded exports are written.
  pub export_dir: PathBuf,

  pub session: SessionFile,

  /// Offset every timestamp is shown and exported in.
  pub utc_offset: FixedOffset,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(
    client: ApiClient,
    session: SessionFile,
    export_dir: PathBuf,
    utc_offset: FixedOffset,
  ) -> Self {
    Self {
      screen: Screen::Form,
      form: FormState::new(),
      field: Field::Search,
      result_cursor: 0,
      program_options: Vec::new(),
      password_input: String::new(),
      admin_password: None,
      submissions: Vec::new(),
      dashboard: None,
      recent_scroll: 0,
      export_dir,
      session,
      utc_offset,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the study-program options.
  pub async fn load_options(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Memuat…".into();
    match self.client.program_studi().await {
      Ok(options) => {
        self.program_options = options;
        self.status_msg.clear();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e.into())
      }
    }
  }

  /// Go to the dashboard, reusing a cached secret when there is one.
  pub async fn open_admin(&mut self) {
    if self.admin_password.is_none() {
      match self.session.load() {
        Ok(cached) => self.admin_password = cached,
        Err(e) => {
          tracing::warn!(error = %e, "ignoring unreadable session file");
          self.session.clear().ok();
        }
      }
    }
    if self.admin_password.is_some() {
      self.screen = Screen::Dashboard;
      self.refresh().await;
    } else {
      self.password_input.clear();
      self.screen = Screen::Login;
    }
  }

  /// Re-fetch the submission set and rebuild the dashboard from it. A
  /// rejected secret ends the session.
  pub async fn refresh(&mut self) {
    let Some(password) = self.admin_password.clone() else {
      self.screen = Screen::Login;
      return;
    };
    self.status_msg = "Memuat data…".into();
    match self.client.submissions(&password).await {
      Ok(rows) => {
        self.dashboard = Some(Dashboard::build(&rows));
        self.submissions = rows;
        self.recent_scroll = 0;
        self.status_msg.clear();
      }
      Err(ClientError::Unauthorized(msg)) => {
        self.end_session();
        self.status_msg = msg;
      }
      Err(e) => {
        tracing::error!(error = %e, "dashboard fetch failed");
        self.status_msg = format!("Gagal mengambil data: {e}");
      }
    }
  }

  fn end_session(&mut self) {
    if let Err(e) = self.session.clear() {
      tracing::warn!(error = %e, "could not remove session file");
    }
    self.admin_password = None;
    self.submissions.clear();
    self.dashboard = None;
    self.password_input.clear();
    self.screen = Screen::Login;
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.screen {
      Screen::Form => self.handle_form_key(key, ctrl).await,
      Screen::Login => self.handle_login_key(key).await,
      Screen::Dashboard => self.handle_dashboard_key(key).await,
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent, ctrl: bool) -> anyhow::Result<bool> {
    if ctrl {
      match key.code {
        KeyCode::Char('s') => self.submit().await,
        KeyCode::Char('a') => self.open_admin().await,
        _ => {}
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Esc => return Ok(false),
      KeyCode::Tab => self.next_field(),
      KeyCode::BackTab => self.prev_field(),
      _ if self.field == Field::Search => self.handle_search_key(key).await,
      _ if self.field == Field::ProgramStudi => self.handle_program_key(key).await,
      KeyCode::Down => self.next_field(),
      KeyCode::Up => self.prev_field(),
      KeyCode::Enter => {
        if self.is_last_field() {
          self.submit().await;
        } else {
          self.next_field();
        }
      }
      KeyCode::Backspace => {
        if let Some(text) = self.field_text_mut() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.field_text_mut() {
          text.push(c);
        }
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down if self.form.show_results => {
        if self.result_cursor + 1 < self.form.results.len() {
          self.result_cursor += 1;
        }
      }
      KeyCode::Up if self.form.show_results => {
        self.result_cursor = self.result_cursor.saturating_sub(1);
      }
      KeyCode::Enter => {
        let picked = self.form.show_results && self.form.select_result(self.result_cursor);
        if picked || self.form.draft.employee.is_some() {
          self.next_field();
        }
      }
      KeyCode::Down if self.form.draft.employee.is_some() => self.next_field(),
      KeyCode::Backspace => {
        let mut q = self.form.query.clone();
        q.pop();
        self.search(q).await;
      }
      KeyCode::Char(c) => {
        let mut q = self.form.query.clone();
        q.push(c);
        self.search(q).await;
      }
      _ => {}
    }
  }

  async fn handle_program_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Left => self.cycle_program(false),
      KeyCode::Right | KeyCode::Char(' ') => self.cycle_program(true),
      KeyCode::Down | KeyCode::Enter => {
        if self.is_last_field() {
          self.submit().await;
        } else {
          self.next_field();
        }
      }
      KeyCode::Up => self.prev_field(),
      _ => {}
    }
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.password_input.clear();
        self.screen = Screen::Form;
      }
      KeyCode::Enter => self.login().await,
      KeyCode::Backspace => {
        self.password_input.pop();
      }
      KeyCode::Char(c) => self.password_input.push(c),
      _ => {}
    }
    Ok(true)
  }

  async fn handle_dashboard_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Char('f') => self.screen = Screen::Form,
      KeyCode::Char('r') => self.refresh().await,
      KeyCode::Char('c') => self.export(ExportFormat::Csv),
      KeyCode::Char('h') => self.export(ExportFormat::Html),
      KeyCode::Char('x') => self.export(ExportFormat::Xlsx),
      KeyCode::Char('L') => {
        self.end_session();
        self.status_msg = "Keluar dari dashboard".into();
      }
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.dashboard.as_ref().map_or(0, |d| d.recent.len());
        if self.recent_scroll + 1 < len {
          self.recent_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.recent_scroll = self.recent_scroll.saturating_sub(1);
      }
      _ => {}
    }
    Ok(true)
  }

  // ── Form actions ──────────────────────────────────────────────────────────

  /// Fields in focus order; the free-text program field only appears when
  /// the sentinel option is chosen.
  pub fn fields(&self) -> Vec<Field> {
    let mut fields = vec![
      Field::Search,
      Field::Instagram,
      Field::BirthPlace,
      Field::BirthDate,
      Field::Quotes,
      Field::ProgramStudi,
    ];
    if self.form.draft.program_studi == PROGRAM_STUDI_OTHER {
      fields.push(Field::ProgramStudiOther);
    }
    fields
  }

  fn is_last_field(&self) -> bool { self.fields().last() == Some(&self.field) }

  fn next_field(&mut self) {
    let fields = self.fields();
    let i = fields.iter().position(|f| *f == self.field).unwrap_or(0);
    self.field = fields[(i + 1) % fields.len()];
  }

  fn prev_field(&mut self) {
    let fields = self.fields();
    let i = fields.iter().position(|f| *f == self.field).unwrap_or(0);
    self.field = fields[(i + fields.len() - 1) % fields.len()];
  }

  fn field_text_mut(&mut self) -> Option<&mut String> {
    let draft = &mut self.form.draft;
    match self.field {
      Field::Instagram => Some(&mut draft.instagram),
      Field::BirthPlace => Some(&mut draft.birth_place),
      Field::BirthDate => Some(&mut draft.birth_date),
      Field::Quotes => Some(&mut draft.quotes),
      Field::ProgramStudiOther => Some(&mut draft.program_studi_other),
      Field::Search | Field::ProgramStudi => None,
    }
  }

  fn cycle_program(&mut self, forward: bool) {
    let n = self.program_options.len();
    if n == 0 {
      return;
    }
    let current = self
      .program_options
      .iter()
      .position(|p| *p == self.form.draft.program_studi);
    let next = match (current, forward) {
      (None, true) => 0,
      (None, false) => n - 1,
      (Some(i), true) => (i + 1) % n,
      (Some(i), false) => (i + n - 1) % n,
    };
    self.form.draft.program_studi = self.program_options[next].clone();
  }

  async fn search(&mut self, query: String) {
    self.result_cursor = 0;
    if query.chars().count() < panitia_core::directory::MIN_QUERY_LEN {
      self.form.set_results(query, Vec::new());
      return;
    }
    match self.client.search_employees(&query).await {
      Ok(results) => self.form.set_results(query, results),
      Err(e) => {
        self.form.set_results(query, Vec::new());
        self.status_msg = format!("Error: {e}");
      }
    }
  }

  async fn submit(&mut self) {
    let row = match self.form.begin_submit() {
      Ok(row) => row,
      Err(e) => {
        self.status_msg = e.to_string();
        return;
      }
    };
    self.status_msg = "Mengirim…".into();

    match self.client.submit(&self.form.draft).await {
      Ok(stored) => {
        tracing::info!(employee_id = %row.employee_id, id = %stored.id, "form submitted");
        self.form.finish_submit(true);
        self.field = Field::Search;
        self.result_cursor = 0;
        self.status_msg = SUBMITTED.into();
      }
      Err(e) => {
        tracing::error!(error = %e, "submission failed");
        self.form.finish_submit(false);
        self.status_msg = format!("Terjadi kesalahan saat mengirim form: {e}");
      }
    }
  }

  // ── Admin actions ─────────────────────────────────────────────────────────

  async fn login(&mut self) {
    let password = std::mem::take(&mut self.password_input);
    match self.client.login(&password).await {
      Ok(true) => {
        if let Err(e) = self.session.save(&password) {
          tracing::warn!(error = %e, "could not cache session");
        }
        self.admin_password = Some(password);
        self.screen = Screen::Dashboard;
        self.refresh().await;
      }
      Ok(false) => self.status_msg = WRONG_PASSWORD.into(),
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// Render the fetched rows and write the file; nothing is fetched again.
  fn export(&mut self, format: ExportFormat) {
    let ctx = ExportContext::now(self.utc_offset);
    let artifact = match format.render(&self.submissions, &ctx) {
      Ok(artifact) => artifact,
      Err(ExportError::Empty) => {
        self.status_msg = ExportError::Empty.to_string();
        return;
      }
      Err(e) => {
        tracing::error!(error = %e, %format, "export failed");
        self.status_msg = format!("Gagal membuat file {format}: {e}");
        return;
      }
    };

    let path = self.export_dir.join(&artifact.filename);
    match std::fs::write(&path, &artifact.body) {
      Ok(()) => {
        tracing::info!(%format, rows = self.submissions.len(), path = %path.display(), "export written");
        self.status_msg = if artifact.inline {
          format!("Tersimpan: {} (buka di browser untuk menyalin atau mencetak)", path.display())
        } else {
          format!("Tersimpan: {}", path.display())
        };
      }
      Err(e) => self.status_msg = format!("Gagal menyimpan {}: {e}", path.display()),
    }
  }
}
