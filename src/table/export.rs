//! Spreadsheet export.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{Error, Result};

/// Sheet name used for exported tables.
pub const SHEET_NAME: &str = "Extracted Table";

/// Writes a grid of cell strings to a workbook file.
pub trait SpreadsheetWriter {
    fn write(&self, rows: &[Vec<String>], path: &Path) -> Result<()>;
}

/// One-sheet `.xlsx` writer. Every cell is written as text.
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    pub sheet_name: String,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
        }
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn write(&self, rows: &[Vec<String>], path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (row_idx, row) in rows.iter().enumerate() {
            let row_num =
                u32::try_from(row_idx).map_err(|_| Error::SheetLimit(format!("row {row_idx}")))?;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| Error::SheetLimit(format!("column {col_idx}")))?;
                worksheet.write_string(row_num, col_num, cell)?;
            }
        }

        workbook.save(path)?;
        info!(rows = rows.len(), path = %path.display(), "workbook written");
        Ok(())
    }
}
