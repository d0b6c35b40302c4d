//! The public form: lookup on the left, fields on the right.

use panitia_core::submission::instagram_handle;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::ACCENT;
use crate::app::{App, Field};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_lookup(f, cols[0], app);
  draw_fields(f, cols[1], app);
}

fn border(focused: bool) -> Style {
  if focused {
    Style::default().fg(ACCENT)
  } else {
    Style::default().fg(Color::DarkGray)
  }
}

// ─── Lookup ───────────────────────────────────────────────────────────────────

fn draw_lookup(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // search box
      Constraint::Min(0),    // results
      Constraint::Length(6), // selected employee
    ])
    .split(area);

  let focused = app.field == Field::Search;
  let cursor = if focused { "_" } else { "" };
  let search = Paragraph::new(format!("{}{cursor}", app.form.query)).block(
    Block::default()
      .title(format!(" {} ", Field::Search.label()))
      .borders(Borders::ALL)
      .border_style(border(focused)),
  );
  f.render_widget(search, rows[0]);

  let block = Block::default()
    .title(format!(" Hasil ({}) ", app.form.results.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  if app.form.show_results {
    let items: Vec<ListItem> = app
      .form
      .results
      .iter()
      .map(|e| {
        ListItem::new(vec![
          Line::from(Span::styled(e.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
          Line::from(Span::styled(
            format!("  {} · {}", e.full_name, e.placement_label()),
            Style::default().fg(Color::Gray),
          )),
        ])
      })
      .collect();

    let mut state = ListState::default();
    state.select(Some(app.result_cursor));
    f.render_stateful_widget(
      List::new(items).block(block).highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
      rows[1],
      &mut state,
    );
  } else {
    let hint = if app.form.query.chars().count() < panitia_core::directory::MIN_QUERY_LEN {
      "Ketik minimal 2 huruf untuk mencari."
    } else {
      "Tidak ada nama yang cocok."
    };
    f.render_widget(
      Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)).block(block),
      rows[1],
    );
  }

  let selected: Vec<Line> = match &app.form.draft.employee {
    Some(e) => {
      let mut lines = vec![Line::from(Span::styled(
        e.full_name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      ))];
      if let Some(p) = e.position() {
        lines.push(detail("Posisi", p));
      }
      for (label, value) in [
        ("Sektor", e.sector()),
        ("Departemen", e.department()),
        ("Divisi", e.division()),
      ] {
        if let Some(v) = value {
          lines.push(detail(label, v));
        }
      }
      lines
    }
    None => vec![Line::from(Span::styled(
      "Belum ada karyawan dipilih.",
      Style::default().fg(Color::DarkGray),
    ))],
  };
  f.render_widget(
    Paragraph::new(selected).block(
      Block::default()
        .title(" Karyawan ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    ),
    rows[2],
  );
}

fn detail<'a>(label: &'a str, value: &'a str) -> Line<'a> {
  Line::from(vec![
    Span::styled(format!("{label:<11}"), Style::default().fg(Color::Cyan)),
    Span::raw(value),
  ])
}

// ─── Fields ───────────────────────────────────────────────────────────────────

fn draw_fields(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Data Diri ")
    .borders(Borders::ALL)
    .border_style(border(app.field != Field::Search));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let draft = &app.form.draft;
  let mut lines: Vec<Line> = Vec::new();

  for field in app.fields().into_iter().filter(|f| *f != Field::Search) {
    let focused = app.field == field;
    let value = match field {
      Field::Instagram => format!("@{}", instagram_handle(&draft.instagram)),
      Field::BirthPlace => draft.birth_place.clone(),
      Field::BirthDate => draft.birth_date.clone(),
      Field::Quotes => draft.quotes.clone(),
      Field::ProgramStudi if draft.program_studi.is_empty() => "< pilih >".to_string(),
      Field::ProgramStudi => format!("< {} >", draft.program_studi),
      Field::ProgramStudiOther => draft.program_studi_other.clone(),
      Field::Search => String::new(),
    };

    let label_style = if focused {
      Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };
    let value_style = if focused {
      Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
      Style::default()
    };
    let cursor = if focused && field != Field::ProgramStudi { "_" } else { "" };

    lines.push(Line::from(Span::styled(field.label(), label_style)));
    lines.push(Line::from(vec![
      Span::raw("  "),
      Span::styled(value, value_style),
      Span::raw(cursor),
    ]));
    lines.push(Line::from(""));
  }

  let submit_style = if app.form.can_submit() {
    Style::default()
      .fg(Color::Black)
      .bg(ACCENT)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let submit_label = if app.form.submitting { " Mengirim… " } else { " Kirim (Ctrl-S) " };
  lines.push(Line::from(Span::styled(submit_label, submit_style)));

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
