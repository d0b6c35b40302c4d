//! Printable, self-contained HTML document with one table per group.
//!
//! The document carries its own script for copying every table to the
//! clipboard as tab-separated text, printing, re-downloading as CSV and
//! opening a blank spreadsheet tab after copying.

use std::fmt::Write as _;

use bytes::Bytes;
use panitia_core::{stats::export_view, submission::Submission};
use quick_xml::escape::escape;

use crate::{
  Artifact, ExportContext,
  row::{HEADERS, cells, group_label, long_date},
};

pub const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Opened in a new tab after the data has been copied.
pub const SPREADSHEET_URL: &str = "https://docs.google.com/spreadsheets/create";

const TITLE: &str = "Form Data Panitia - Per Departemen";

pub fn render(submissions: &[Submission], ctx: &ExportContext) -> Artifact {
  let offset = ctx.offset();
  let groups = export_view(submissions);

  let mut nav = String::new();
  let mut sections = String::new();

  for (i, group) in groups.iter().enumerate() {
    let key = escape(group.key);
    let _ = writeln!(nav, r##"<a href="#dept-{i}" class="nav-link">{key}</a>"##);

    let _ = writeln!(sections, r#"<div class="department-section" id="dept-{i}">"#);
    let _ = writeln!(
      sections,
      r#"<h2 class="dept-header">{}</h2>"#,
      escape(&group_label(group.key, group.members.len()))
    );
    sections.push_str("<table class=\"data-table\">\n<thead><tr>");
    for h in HEADERS {
      let _ = write!(sections, "<th>{h}</th>");
    }
    sections.push_str("</tr></thead>\n<tbody>\n");
    for (n, s) in group.members.iter().enumerate() {
      sections.push_str("<tr>");
      for cell in cells(n + 1, s, offset) {
        let _ = write!(sections, "<td>{}</td>", escape(&cell));
      }
      sections.push_str("</tr>\n");
    }
    sections.push_str("</tbody>\n</table>\n</div>\n");
  }

  let mut doc = String::with_capacity(STYLE.len() + SCRIPT.len() + sections.len() + 2048);
  doc.push_str("<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n");
  let _ = writeln!(doc, "<title>{TITLE}</title>");
  doc.push_str(STYLE);
  doc.push_str("</head>\n<body>\n<div class=\"header\">\n");
  let _ = writeln!(doc, "<h1>{TITLE}</h1>");
  let _ = writeln!(
    doc,
    "<p>Total: {} data | {} departemen | {}</p>",
    submissions.len(),
    groups.len(),
    long_date(ctx.generated_at)
  );
  doc.push_str(TOOLBAR);
  doc.push_str("</div>\n<div class=\"navigation\">\n");
  doc.push_str("<div class=\"nav-title\">Navigasi Cepat - Pilih Departemen:</div>\n");
  doc.push_str("<div class=\"nav-links\">\n");
  doc.push_str(&nav);
  doc.push_str("</div>\n</div>\n");
  doc.push_str(&sections);
  doc.push_str(
    "<button class=\"back-to-top\" id=\"backToTop\" \
     onclick=\"window.scrollTo({top: 0, behavior: 'smooth'})\">&#8593;</button>\n",
  );
  let _ = writeln!(
    doc,
    "<script>\nconst CSV_FILENAME = \"{}\";\nconst SPREADSHEET_URL = \"{SPREADSHEET_URL}\";",
    ctx.filename("csv")
  );
  doc.push_str(SCRIPT);
  doc.push_str("</script>\n</body>\n</html>\n");

  Artifact {
    filename:     ctx.filename("html"),
    content_type: CONTENT_TYPE,
    body:         Bytes::from(doc),
    inline:       true,
  }
}

const TOOLBAR: &str = r#"<div class="toolbar">
<button class="export-btn" onclick="copyAllData()">Copy Semua Data</button>
<button class="export-btn" onclick="window.print()">Print</button>
<button class="export-btn" onclick="exportToCSV()">Download CSV</button>
<button class="export-btn" onclick="exportAllToGoogleSheets()">Buka di Google Sheets</button>
</div>
"#;

const STYLE: &str = r#"<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; background: #f3f4f6; padding-bottom: 50px; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px 20px; position: sticky; top: 0; z-index: 100; }
h1 { font-size: 28px; margin-bottom: 10px; }
.toolbar { display: flex; gap: 10px; margin-top: 20px; flex-wrap: wrap; }
.export-btn { background: white; color: #667eea; padding: 12px 24px; border: none; border-radius: 8px; cursor: pointer; font-weight: 600; }
.navigation { background: white; padding: 20px; margin: 20px; border-radius: 12px; }
.nav-title { font-size: 18px; font-weight: 600; margin-bottom: 15px; color: #1f2937; }
.nav-links { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 10px; }
.nav-link { display: block; padding: 10px 15px; background: #f3f4f6; border-radius: 8px; text-decoration: none; color: #4b5563; }
.department-section { margin: 20px; background: white; border-radius: 12px; padding: 20px; scroll-margin-top: 100px; }
.dept-header { color: #667eea; font-size: 20px; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 3px solid #667eea; }
.data-table { border-collapse: collapse; width: 100%; font-size: 14px; }
.data-table th, .data-table td { border: 1px solid #e5e7eb; padding: 12px; text-align: left; }
.data-table th { background-color: #667eea; color: white; position: sticky; top: 95px; }
.data-table tr:nth-child(even) { background-color: #f9fafb; }
.back-to-top { position: fixed; bottom: 30px; right: 30px; background: #667eea; color: white; width: 50px; height: 50px; border-radius: 50%; border: none; cursor: pointer; font-size: 24px; display: none; }
@media print {
  .header, .navigation, .export-btn, .back-to-top { display: none !important; }
  .data-table th { position: relative; top: 0; }
  .department-section { page-break-inside: avoid; margin: 20px 0; }
}
</style>
"#;

const SCRIPT: &str = r#"
window.addEventListener('scroll', () => {
  document.getElementById('backToTop').style.display = window.scrollY > 300 ? 'block' : 'none';
});

function copyAllData() {
  const headers = document.querySelectorAll('.dept-header');
  let allText = '';
  document.querySelectorAll('.data-table').forEach((table, idx) => {
    allText += headers[idx].textContent + '\n\n';
    table.querySelectorAll('tr').forEach(row => {
      const cells = row.querySelectorAll('th, td');
      allText += Array.from(cells).map(cell => cell.textContent).join('\t') + '\n';
    });
    allText += '\n\n';
  });
  return navigator.clipboard.writeText(allText).then(() => {
    alert('Semua data telah disalin ke clipboard!\n\nAnda bisa paste ke Excel atau Google Sheets.');
  });
}

function exportAllToGoogleSheets() {
  copyAllData();
  setTimeout(() => { window.open(SPREADSHEET_URL, '_blank'); }, 500);
}

function csvField(text) {
  return /[",\n\r]/.test(text) ? '"' + text.replace(/"/g, '""') + '"' : text;
}

function exportToCSV() {
  const lines = [];
  document.querySelectorAll('.department-section').forEach(section => {
    lines.push(csvField(section.querySelector('.dept-header').textContent));
    lines.push('');
    section.querySelectorAll('.data-table tr').forEach(row => {
      const cells = row.querySelectorAll('th, td');
      lines.push(Array.from(cells).map(cell => csvField(cell.textContent)).join(','));
    });
    lines.push('');
  });
  const blob = new Blob([lines.join('\n')], { type: 'text/csv' });
  const a = document.createElement('a');
  a.href = URL.createObjectURL(blob);
  a.download = CSV_FILENAME;
  a.click();
}
"#;
