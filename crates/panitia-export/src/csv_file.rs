//! CSV download: one labelled block per group.
//!
//! ```text
//! Logistik (2 orang)
//!
//! No,Nama,...
//! 1,Budi,...
//! 2,Andi,...
//!
//! PM (1 orang)
//! ...
//! ```

use bytes::Bytes;
use csv::{QuoteStyle, WriterBuilder};
use panitia_core::{stats::export_view, submission::Submission};

use crate::{
  Artifact, Error, ExportContext, Result,
  row::{HEADERS, cells, group_label},
};

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub fn render(submissions: &[Submission], ctx: &ExportContext) -> Result<Artifact> {
  let offset = ctx.offset();
  let mut out: Vec<u8> = Vec::new();

  for group in export_view(submissions) {
    out.extend(records([vec![group_label(group.key, group.members.len())]])?);
    out.push(b'\n');

    let header = HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>();
    let rows = group
      .members
      .iter()
      .enumerate()
      .map(|(i, s)| cells(i + 1, s, offset).to_vec());
    out.extend(records(std::iter::once(header).chain(rows))?);
    out.push(b'\n');
  }

  Ok(Artifact {
    filename:     ctx.filename("csv"),
    content_type: CONTENT_TYPE,
    body:         Bytes::from(out),
    inline:       false,
  })
}

/// Encode `rows` with minimal quoting: a field is wrapped in quotes (inner
/// quotes doubled) only when it holds a delimiter, quote or line break.
fn records<I>(rows: I) -> Result<Vec<u8>>
where
  I: IntoIterator<Item = Vec<String>>,
{
  let mut writer = WriterBuilder::new()
    .flexible(true)
    .quote_style(QuoteStyle::Necessary)
    .from_writer(Vec::new());
  for row in rows {
    writer.write_record(&row)?;
  }
  writer
    .into_inner()
    .map_err(|e| Error::Csv(e.into_error().into()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures;

  fn body(rows: &[Submission]) -> String {
    let a = render(rows, &fixtures::ctx()).unwrap();
    String::from_utf8(a.body.to_vec()).unwrap()
  }

  #[test]
  fn blocks_are_alphabetical_and_labelled() {
    let text = body(&fixtures::mixed());
    let logistik = text.find("Logistik (2 orang)").unwrap();
    let pm = text.find("PM (1 orang)").unwrap();
    assert!(logistik < pm);
    assert!(text.starts_with("Logistik (2 orang)\n\nNo,Nama,Nama Lengkap,"));
  }

  #[test]
  fn rows_are_numbered_within_each_group() {
    let text = body(&fixtures::mixed());
    assert!(text.contains("\n1,Budi,Budi Santoso,-,Umum,Logistik,Gudang,"));
    assert!(text.contains("\n2,Andi,Andi Santoso,"));
    assert!(text.contains("\n1,Sari,Sari Santoso,PM,-,-,-,"));
  }

  #[test]
  fn comma_and_quote_fields_are_escaped_and_reparse() {
    let mut s = fixtures::sub("Budi", Some("Logistik"), None);
    s.quotes = "Kerja \"keras\", pantang mundur".into();
    s.birth_place = "Jakarta, Indonesia".into();
    let text = body(&[s.clone()]);

    assert!(text.contains("\"Kerja \"\"keras\"\", pantang mundur\""));
    assert!(text.contains("\"Jakarta, Indonesia\""));

    let mut reader = csv::ReaderBuilder::new()
      .has_headers(false)
      .flexible(true)
      .from_reader(text.as_bytes());
    let data_row = reader
      .records()
      .map(Result::unwrap)
      .find(|r| r.get(1) == Some("Budi"))
      .unwrap();
    assert_eq!(data_row.get(9), Some(s.birth_place.as_str()));
    assert_eq!(data_row.get(11), Some(s.quotes.as_str()));
  }

  #[test]
  fn plain_fields_stay_unquoted() {
    let text = body(&fixtures::mixed());
    assert!(!text.contains("\"Budi\""));
  }
}
