//! Multi-sheet XLSX workbook: a summary sheet followed by one sheet per
//! group. The binary encoding is delegated to `rust_xlsxwriter`.

use bytes::Bytes;
use panitia_core::{
  stats::{export_view, stats_view},
  submission::Submission,
};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::{
  Artifact, ExportContext, Result,
  row::{COLUMN_WIDTHS, HEADERS, cells, timestamp},
  sheet_name::SheetNamer,
};

pub const CONTENT_TYPE: &str =
  "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SUMMARY_SHEET: &str = "Ringkasan";

const ACCENT: Color = Color::RGB(0x667EEA);

// Sheet layout: title, total, blank, header, data.
const TITLE_ROW: u32 = 0;
const TOTAL_ROW: u32 = 1;
const HEADER_ROW: u32 = 3;

struct Styles {
  title:  Format,
  bold:   Format,
  header: Format,
  cell:   Format,
}

impl Styles {
  fn new() -> Self {
    Self {
      title:  Format::new().set_bold().set_font_size(14).set_font_color(ACCENT),
      bold:   Format::new().set_bold(),
      header: Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(ACCENT)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center),
      cell:   Format::new().set_border(FormatBorder::Thin).set_text_wrap(),
    }
  }
}

pub fn render(submissions: &[Submission], ctx: &ExportContext) -> Result<Artifact> {
  let styles = Styles::new();
  let mut namer = SheetNamer::new();
  let mut workbook = Workbook::new();

  let summary_name = namer.name(SUMMARY_SHEET);
  write_summary(workbook.add_worksheet(), &summary_name, submissions, ctx, &styles)?;

  let offset = ctx.offset();
  for group in export_view(submissions) {
    let sheet = workbook.add_worksheet();
    sheet.set_name(namer.name(group.key))?;

    let last_col = (HEADERS.len() - 1) as u16;
    sheet.merge_range(TITLE_ROW, 0, TITLE_ROW, last_col, group.key, &styles.title)?;
    sheet.write_string_with_format(TOTAL_ROW, 0, "Total", &styles.bold)?;
    sheet.write_string(TOTAL_ROW, 1, format!("{} orang", group.members.len()))?;

    write_header(sheet, &styles)?;
    for (i, s) in group.members.iter().enumerate() {
      let row = HEADER_ROW + 1 + i as u32;
      for (col, value) in cells(i + 1, s, offset).iter().enumerate() {
        let col = col as u16;
        if col == 0 {
          sheet.write_number_with_format(row, col, (i + 1) as f64, &styles.cell)?;
        } else {
          sheet.write_string_with_format(row, col, value, &styles.cell)?;
        }
      }
    }
    sheet.set_freeze_panes(HEADER_ROW + 1, 0)?;
  }

  let buffer = workbook.save_to_buffer()?;
  Ok(Artifact {
    filename:     ctx.filename("xlsx"),
    content_type: CONTENT_TYPE,
    body:         Bytes::from(buffer),
    inline:       false,
  })
}

fn write_header(sheet: &mut Worksheet, styles: &Styles) -> Result<()> {
  for (col, (title, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
    let col = col as u16;
    sheet.write_string_with_format(HEADER_ROW, col, *title, &styles.header)?;
    sheet.set_column_width(col, width)?;
  }
  Ok(())
}

fn write_summary(
  sheet: &mut Worksheet,
  name: &str,
  submissions: &[Submission],
  ctx: &ExportContext,
  styles: &Styles,
) -> Result<()> {
  let stats = stats_view(submissions);

  sheet.set_name(name)?;
  sheet.write_string_with_format(0, 0, "Form Data Panitia - Ringkasan", &styles.title)?;

  sheet.write_string_with_format(2, 0, "Total Data", &styles.bold)?;
  sheet.write_number(2, 1, submissions.len() as f64)?;
  sheet.write_string_with_format(3, 0, "Total Departemen", &styles.bold)?;
  sheet.write_number(3, 1, stats.len() as f64)?;
  sheet.write_string_with_format(4, 0, "Diekspor", &styles.bold)?;
  sheet.write_string(4, 1, timestamp(ctx.generated_at.to_utc(), ctx.offset()))?;

  sheet.write_string_with_format(6, 0, "Departemen / Posisi", &styles.header)?;
  sheet.write_string_with_format(6, 1, "Jumlah", &styles.header)?;
  for (i, stat) in stats.iter().enumerate() {
    let row = 7 + i as u32;
    sheet.write_string_with_format(row, 0, &stat.key, &styles.cell)?;
    sheet.write_number_with_format(row, 1, stat.count as f64, &styles.cell)?;
  }

  sheet.set_column_width(0, 30)?;
  sheet.set_column_width(1, 22)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashMap,
    io::{Cursor, Read},
  };

  use quick_xml::{Reader, events::Event};
  use zip::ZipArchive;

  use super::*;
  use crate::fixtures;

  /// Sheet names in tab order, and each sheet's filled cells by reference.
  struct Unpacked {
    names:  Vec<String>,
    sheets: Vec<HashMap<String, String>>,
  }

  impl Unpacked {
    fn sheet(&self, name: &str) -> &HashMap<String, String> {
      let i = self.names.iter().position(|n| n == name).unwrap();
      &self.sheets[i]
    }
  }

  fn unpack(artifact: &Artifact) -> Unpacked {
    let mut archive = ZipArchive::new(Cursor::new(artifact.body.to_vec())).unwrap();
    let mut part = |name: &str| {
      let mut xml = String::new();
      archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
      xml
    };

    let names = sheet_names(&part("xl/workbook.xml"));
    let shared = shared_strings(&part("xl/sharedStrings.xml"));
    let sheets = (1..=names.len())
      .map(|n| sheet_cells(&part(&format!("xl/worksheets/sheet{n}.xml")), &shared))
      .collect();
    Unpacked { names, sheets }
  }

  fn sheet_names(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    loop {
      match reader.read_event().unwrap() {
        Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"sheet" => {
          let name = e.try_get_attribute("name").unwrap().unwrap();
          names.push(name.unescape_value().unwrap().into_owned());
        }
        Event::Eof => break,
        _ => {}
      }
    }
    names
  }

  fn shared_strings(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut strings: Vec<String> = Vec::new();
    loop {
      match reader.read_event().unwrap() {
        Event::Start(e) if e.name().as_ref() == b"si" => strings.push(String::new()),
        Event::Text(t) => {
          if let Some(last) = strings.last_mut() {
            last.push_str(&t.unescape().unwrap());
          }
        }
        Event::Eof => break,
        _ => {}
      }
    }
    strings
  }

  fn sheet_cells(xml: &str, shared: &[String]) -> HashMap<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut cells = HashMap::new();
    // Reference of the open `<c>` and whether its value indexes `shared`.
    let mut open: Option<(String, bool)> = None;
    loop {
      match reader.read_event().unwrap() {
        Event::Start(e) if e.name().as_ref() == b"c" => {
          let at = e.try_get_attribute("r").unwrap().unwrap();
          let is_shared = e
            .try_get_attribute("t")
            .unwrap()
            .is_some_and(|t| t.value.as_ref() == b"s");
          open = Some((at.unescape_value().unwrap().into_owned(), is_shared));
        }
        Event::Text(t) => {
          if let Some((at, is_shared)) = open.take() {
            let raw = t.unescape().unwrap();
            let value = if is_shared {
              shared[raw.parse::<usize>().unwrap()].clone()
            } else {
              raw.into_owned()
            };
            cells.insert(at, value);
          }
        }
        Event::Eof => break,
        _ => {}
      }
    }
    cells
  }

  fn number(cells: &HashMap<String, String>, at: &str) -> f64 {
    cells[at].parse().unwrap()
  }

  #[test]
  fn produces_a_zip_container() {
    let a = render(&fixtures::mixed(), &fixtures::ctx()).unwrap();
    assert_eq!(a.content_type, CONTENT_TYPE);
    assert_eq!(a.filename, "Form_Panitia_Per_Departemen_2024-05-01.xlsx");
    // XLSX is a ZIP archive.
    assert_eq!(&a.body[..2], b"PK");
  }

  #[test]
  fn summary_comes_first_and_counts_every_group() {
    let ctx = fixtures::ctx();
    let book = unpack(&render(&fixtures::mixed(), &ctx).unwrap());
    assert_eq!(book.names, [SUMMARY_SHEET, "Logistik", "PM"]);

    let summary = book.sheet(SUMMARY_SHEET);
    assert_eq!(summary["A3"], "Total Data");
    assert_eq!(number(summary, "B3"), 3.0);
    assert_eq!(number(summary, "B4"), 2.0);
    assert_eq!(summary["B5"], timestamp(ctx.generated_at.to_utc(), ctx.offset()));

    // Stats order: largest group first.
    assert_eq!(summary["A8"], "Logistik");
    assert_eq!(number(summary, "B8"), 2.0);
    assert_eq!(summary["A9"], "PM");
    assert_eq!(number(summary, "B9"), 1.0);
    assert!(!summary.contains_key("A10"));
  }

  #[test]
  fn group_sheet_has_title_total_header_and_one_row_per_member() {
    let book = unpack(&render(&fixtures::mixed(), &fixtures::ctx()).unwrap());
    let logistik = book.sheet("Logistik");

    assert_eq!(logistik["A1"], "Logistik");
    assert_eq!(logistik["A2"], "Total");
    assert_eq!(logistik["B2"], "2 orang");
    for (at, title) in [("A4", "No"), ("B4", "Nama"), ("C4", "Nama Lengkap"), ("M4", "Tanggal Input")] {
      assert_eq!(logistik[at], title);
    }

    // Members keep fetch order and are numbered from 1.
    assert_eq!(number(logistik, "A5"), 1.0);
    assert_eq!(logistik["B5"], "Budi");
    assert_eq!(number(logistik, "A6"), 2.0);
    assert_eq!(logistik["B6"], "Andi");
    assert!(!logistik.contains_key("A7"));

    // Staff rows carry no position.
    assert_eq!(logistik["D5"], "-");
    assert_eq!(logistik["F5"], "Logistik");
  }

  #[test]
  fn hostile_group_labels_get_legal_unique_sheet_names() {
    let rows = vec![
      fixtures::sub("Budi", Some("Acara: Pembukaan / Penutupan [Utama]"), None),
      fixtures::sub("Andi", Some("Departemen Hubungan Masyarakat dan Protokoler"), None),
      fixtures::sub("Rina", Some("Departemen Hubungan Masyarakat dan Sponsorship"), None),
      fixtures::sub("Sari", Some("Ringkasan"), None),
      fixtures::sub("Dedi", Some("History"), None),
    ];
    let book = unpack(&render(&rows, &fixtures::ctx()).unwrap());
    assert_eq!(book.names, [
      "Ringkasan",
      "Acara_ Pembukaan _ Penutupan _U",
      "Departemen Hubungan Masyarakat",
      "Departemen Hubungan Masyara (2)",
      "History (2)",
      "Ringkasan (2)",
    ]);

    // The title row keeps the label as entered.
    let acara = book.sheet("Acara_ Pembukaan _ Penutupan _U");
    assert_eq!(acara["A1"], "Acara: Pembukaan / Penutupan [Utama]");
  }
}
