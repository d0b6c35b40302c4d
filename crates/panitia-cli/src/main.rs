//! `panitia` — terminal client for the committee-data form and the admin
//! dashboard.
//!
//! # Usage
//!
//! ```text
//! panitia --url http://localhost:3000
//! panitia --admin --export-dir ~/Downloads
//! panitia --config ~/.config/panitia/config.toml
//! ```

mod app;
mod client;
mod session;
mod ui;

use std::{io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chrono::FixedOffset;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use session::SessionFile;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "panitia", about = "Terminal client for the Panitia form and dashboard")]
struct Args {
  /// Path to a TOML config file (url, session_path, export_dir,
  /// utc_offset_hours).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the panitia server (default: http://localhost:3000).
  #[arg(long, env = "PANITIA_URL")]
  url: Option<String>,

  /// Open the admin dashboard instead of the form.
  #[arg(long)]
  admin: bool,

  /// Where the admin session is cached.
  #[arg(long, value_name = "FILE")]
  session: Option<PathBuf>,

  /// Directory that receives exported files (default: current directory).
  #[arg(long, value_name = "DIR")]
  export_dir: Option<PathBuf>,

  /// Hours east of UTC for shown and exported timestamps (default: 7, WIB).
  #[arg(long, value_name = "HOURS", allow_hyphen_values = true)]
  utc_offset: Option<i32>,

  /// Write logs to this file; the terminal itself is taken by the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:              String,
  session_path:     Option<PathBuf>,
  export_dir:       Option<PathBuf>,
  utc_offset_hours: Option<i32>,
}

/// WIB, where the committee sits.
const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// `None` outside ±23 hours.
fn utc_offset(hours: i32) -> Option<FixedOffset> {
  FixedOffset::east_opt(hours.checked_mul(3600)?)
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = std::fs::File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init();
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:3000".to_string()),
  };
  let session = SessionFile::new(
    args
      .session
      .or(file_cfg.session_path)
      .unwrap_or_else(SessionFile::default_path),
  );
  let export_dir = args
    .export_dir
    .or(file_cfg.export_dir)
    .unwrap_or_else(|| PathBuf::from("."));
  let hours = args
    .utc_offset
    .or(file_cfg.utc_offset_hours)
    .unwrap_or(DEFAULT_UTC_OFFSET_HOURS);
  let offset = utc_offset(hours).with_context(|| format!("UTC offset {hours} is out of range"))?;

  let client = ApiClient::new(api_config).context("building HTTP client")?;
  let mut app = App::new(client, session, export_dir, offset);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load_options().await;
  if load_result.is_ok() && args.admin {
    app.open_admin().await;
  }

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn offset_must_be_a_real_zone() {
    assert_eq!(utc_offset(7), FixedOffset::east_opt(7 * 3600));
    assert_eq!(utc_offset(-3), FixedOffset::west_opt(3 * 3600));
    assert_eq!(utc_offset(30), None);
  }
}
