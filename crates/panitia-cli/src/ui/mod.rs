//! TUI rendering — orchestrates all panes.

pub mod dashboard;
pub mod form;

use chrono::Utc;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

/// Accent used for borders, headers and bars.
pub const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::Form => form::draw(f, rows[1], app),
    Screen::Login => dashboard::draw_login(f, rows[1], app),
    Screen::Dashboard => dashboard::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Utc::now().with_timezone(&app.utc_offset).format("%Y-%m-%d").to_string();
  let title = match app.screen {
    Screen::Form => " Form Data Panitia",
    Screen::Login | Screen::Dashboard => " Dashboard Admin",
  };

  let left = Span::styled(
    title,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(ACCENT));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::Form => (
      "FORM",
      "Tab/↑↓ pindah  ←→ program studi  Ctrl-S kirim  Ctrl-A admin  Esc keluar",
    ),
    Screen::Login => ("LOGIN", "Enter masuk  Esc kembali"),
    Screen::Dashboard => (
      "ADMIN",
      "r refresh  c CSV  h HTML  x XLSX  jk gulir  L logout  f form  q keluar",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}
