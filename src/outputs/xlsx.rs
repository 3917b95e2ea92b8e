//! Spreadsheet export, same schema as the CSV.
//!
//! Built only with the `xlsx` feature (on by default). Without it,
//! [`write_xlsx`] reports the writer as unavailable; callers log that and
//! carry on, since the spreadsheet is never required.

use crate::models::ArticleRecord;
use std::error::Error;
use std::path::PathBuf;

/// Write `{output_dir}/{file_name}.xlsx` with a header row and one row per record.
#[cfg(feature = "xlsx")]
#[tracing::instrument(level = "info", skip_all, fields(%output_dir, %file_name))]
pub fn write_xlsx(
    records: &[ArticleRecord],
    output_dir: &str,
    file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    use rust_xlsxwriter::{Format, Workbook};

    let path = std::path::Path::new(output_dir).join(format!("{}.xlsx", file_name));
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in ArticleRecord::COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in record.as_row().iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, *value)?;
        }
    }

    workbook.save(&path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "Wrote XLSX export");
    Ok(path)
}

/// Spreadsheet export stub (always fails when the `xlsx` feature is disabled).
#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(
    _records: &[ArticleRecord],
    _output_dir: &str,
    _file_name: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    Err("spreadsheet writer unavailable: built without the `xlsx` feature".into())
}
