//! Spreadsheet export of the consolidated report
//!
//! Produces an XLSX workbook with a single sheet: a header row with the
//! report column names followed by one row per report row.

use crate::error::{Result, SocietyReportError};
use crate::report::{column_headers, Cell, ReportRow};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Name of the only worksheet in the exported workbook
pub const SHEET_NAME: &str = "Consolidated Report";

/// Conventional file name for a downloaded report
pub const EXPORT_FILENAME: &str = "Consolidated_Pharma_Report.xlsx";

/// MIME type of the exported blob
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Width applied to the free-text columns
const TEXT_COLUMN_WIDTH: f64 = 48.0;

/// Render report rows into an XLSX byte blob
///
/// Membership counts are written as numbers; every other cell is a string.
/// An empty slice yields a sheet with the header row only.
///
/// # Errors
///
/// Returns `SocietyReportError::Export` if the workbook cannot be built.
///
/// # Examples
///
/// ```
/// use societyreport::export::render_spreadsheet;
/// use societyreport::report::ReportTable;
///
/// let mut table = ReportTable::new();
/// table.add_organization("IOWA Oncology Society");
/// let bytes = render_spreadsheet(table.rows()).unwrap();
/// // XLSX files are zip archives
/// assert_eq!(&bytes[..2], b"PK");
/// ```
pub fn render_spreadsheet(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook
        .add_worksheet()
        .set_name(SHEET_NAME)
        .map_err(|e| SocietyReportError::Export(format!("Failed to create sheet: {}", e)))?;

    for (col, header) in column_headers().iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| SocietyReportError::Export(format!("Failed to write header: {}", e)))?;
        if col >= 2 {
            worksheet
                .set_column_width(col, TEXT_COLUMN_WIDTH)
                .map_err(|e| {
                    SocietyReportError::Export(format!("Failed to set column width: {}", e))
                })?;
        }
    }

    for (idx, row) in rows.iter().enumerate() {
        // rust_xlsxwriter uses 0-based row/col as u32/u16; row 0 is the header
        let row_num = idx as u32 + 1;
        for (col, cell) in row.cells().iter().enumerate() {
            let col = col as u16;
            let written = match cell {
                Cell::Text(text) => worksheet.write_string(row_num, col, *text).map(|_| ()),
                Cell::Count(count) => worksheet
                    .write_number(row_num, col, f64::from(*count))
                    .map(|_| ()),
            };
            written.map_err(|e| {
                SocietyReportError::Export(format!(
                    "Failed to write cell ({}, {}): {}",
                    row_num, col, e
                ))
            })?;
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| SocietyReportError::Export(format!("Failed to save workbook: {}", e)))?;

    tracing::debug!(
        "Rendered spreadsheet: {} rows, {} bytes",
        rows.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// An exported report ready to be offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetBlob {
    /// Suggested file name
    pub file_name: &'static str,
    /// MIME type of `bytes`
    pub content_type: &'static str,
    /// XLSX contents
    pub bytes: Vec<u8>,
}

/// Render report rows into a [`SpreadsheetBlob`] with the conventional name and type
///
/// # Errors
///
/// Returns `SocietyReportError::Export` if the workbook cannot be built.
pub fn export_blob(rows: &[ReportRow]) -> Result<SpreadsheetBlob> {
    Ok(SpreadsheetBlob {
        file_name: EXPORT_FILENAME,
        content_type: XLSX_MIME_TYPE,
        bytes: render_spreadsheet(rows)?,
    })
}

/// Render the report and write it to `path`
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_spreadsheet(rows: &[ReportRow], path: &Path) -> Result<usize> {
    let bytes = render_spreadsheet(rows)?;
    std::fs::write(path, &bytes).map_err(SocietyReportError::Io)?;
    tracing::info!(
        "Wrote report with {} rows to {}",
        rows.len(),
        path.display()
    );
    Ok(bytes.len())
}
