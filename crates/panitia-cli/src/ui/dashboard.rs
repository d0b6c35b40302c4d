//! Admin screens: the secret prompt and the dashboard.

use chrono::{DateTime, FixedOffset, Utc};
use panitia_core::stats::{StatShare, group_key};
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::ACCENT;
use crate::app::App;

const BAR_WIDTH: usize = 24;

// ─── Login ────────────────────────────────────────────────────────────────────

pub fn draw_login(f: &mut Frame, area: Rect, app: &App) {
  let popup = centered(area, 44, 7);
  let block = Block::default()
    .title(" Login Admin ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(ACCENT));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let masked = "•".repeat(app.password_input.chars().count());
  let lines = vec![
    Line::from(Span::styled("Password", Style::default().fg(Color::Cyan))),
    Line::from(format!("{masked}_")),
    Line::from(""),
    Line::from(Span::styled("Enter untuk masuk", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(dash) = &app.dashboard else {
    f.render_widget(
      Paragraph::new("Memuat data…")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center),
      area,
    );
    return;
  };

  let stats_height = (dash.stats.len() as u16).clamp(1, 12) + 2;
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3),            // summary cards
      Constraint::Length(stats_height), // per-group bars
      Constraint::Min(0),               // recent rows
    ])
    .split(area);

  // Summary cards.
  let last = dash
    .last_updated
    .map(|t| stamp(t, app.utc_offset))
    .unwrap_or_else(|| "-".to_string());
  let cards = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(rows[0]);
  for (i, (title, value)) in [
    ("Total Data", dash.total_submissions.to_string()),
    ("Departemen", dash.total_groups.to_string()),
    ("Terakhir Update", last),
  ]
  .into_iter()
  .enumerate()
  {
    f.render_widget(card(title, value), cards[i]);
  }

  // Per-group bars.
  let stat_lines: Vec<Line> = if dash.stats.is_empty() {
    vec![Line::from(Span::styled("Belum ada data.", Style::default().fg(Color::DarkGray)))]
  } else {
    let width = dash.stats.iter().map(|s| s.key.chars().count()).max().unwrap_or(0).min(28);
    dash.stats.iter().map(|s| stat_line(s, width)).collect()
  };
  f.render_widget(
    Paragraph::new(stat_lines).block(
      Block::default()
        .title(" Statistik per Departemen ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    ),
    rows[1],
  );

  // Recent rows.
  let header = Row::new(["Nama", "Departemen/Posisi", "Program Studi", "Instagram", "Tanggal"])
    .style(Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD));
  let body: Vec<Row> = dash
    .recent
    .iter()
    .skip(app.recent_scroll)
    .map(|s| {
      Row::new(vec![
        Cell::from(s.full_name.clone()),
        Cell::from(group_key(s).to_string()),
        Cell::from(s.program_studi.clone()),
        Cell::from(format!("@{}", s.instagram)),
        Cell::from(stamp(s.created_at, app.utc_offset)),
      ])
    })
    .collect();
  let table = Table::new(body, [
    Constraint::Percentage(24),
    Constraint::Percentage(18),
    Constraint::Percentage(26),
    Constraint::Percentage(14),
    Constraint::Percentage(18),
  ])
  .header(header)
  .block(
    Block::default()
      .title(format!(" Data Terbaru ({}) ", dash.recent.len()))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray)),
  );
  f.render_widget(table, rows[2]);
}

fn card(title: &str, value: String) -> Paragraph<'_> {
  Paragraph::new(Line::from(Span::styled(
    value,
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
  )))
  .alignment(Alignment::Center)
  .block(
    Block::default()
      .title(format!(" {title} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray)),
  )
}

fn stat_line(s: &StatShare, label_width: usize) -> Line<'static> {
  let label: String = s.key.chars().take(label_width).collect();
  Line::from(vec![
    Span::styled(format!("{label:<label_width$} "), Style::default().fg(Color::Cyan)),
    Span::styled(bar(s.percentage), Style::default().fg(ACCENT)),
    Span::raw(format!(" {} ({:.1}%)", s.count, s.percentage)),
  ])
}

/// Same offset as the exports, so a row reads the same on screen and on paper.
fn stamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
  at.with_timezone(&offset).format("%d/%m/%Y %H.%M").to_string()
}

/// A fixed-width bar for a 0–100 percentage.
fn bar(percentage: f64) -> String {
  let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
  format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
