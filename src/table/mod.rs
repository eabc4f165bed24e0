//! Presenting extracted tables.
//!
//! The backend returns table markup. [`ExtractedTable::parse`] pulls the
//! first `<table>` out of it and walks `tr` rows and `td`/`th` cells into a
//! grid of display strings. [`TablePresenter`] holds at most one table;
//! presenting a new one replaces the old.

pub mod export;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{Error, Result};

pub use export::{SpreadsheetWriter, XlsxWriter};

/// An extracted table, parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    /// The `<table>` element's HTML.
    pub markup: String,
    /// Cell text: `rows[row_idx][col_idx]`.
    pub rows: Vec<Vec<String>>,
}

impl ExtractedTable {
    /// Parse the first `<table>` in `markup`.
    pub fn parse(markup: &str) -> Result<Self> {
        let fragment = Html::parse_fragment(markup);
        let table_selector = selector("table")?;
        let table = fragment
            .select(&table_selector)
            .next()
            .ok_or(Error::NoTableMarkup)?;

        Ok(Self {
            markup: table.html(),
            rows: grid(table)?,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Render as a GitHub-flavored markdown table. The first row is the header.
    pub fn to_markdown(&self) -> String {
        let col_count = self.column_count();
        if col_count == 0 {
            return String::new();
        }

        let mut md = String::new();

        // Header row
        push_row(&mut md, &self.rows[0], col_count);

        // Separator row
        md.push('|');
        for _ in 0..col_count {
            md.push_str(" --- |");
        }
        md.push('\n');

        // Data rows
        for row in self.rows.iter().skip(1) {
            push_row(&mut md, row, col_count);
        }

        md
    }
}

fn push_row(md: &mut String, row: &[String], col_count: usize) {
    md.push('|');
    for col in 0..col_count {
        let cell = row.get(col).map_or("", String::as_str);
        md.push(' ');
        md.push_str(&cell.replace('|', "\\|").replace('\n', " "));
        md.push_str(" |");
    }
    md.push('\n');
}

/// Walk rows and cells of `table` into display strings.
fn grid(table: ElementRef<'_>) -> Result<Vec<Vec<String>>> {
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;

    Ok(table
        .select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect()
        })
        .collect())
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Selector(format!("{css}: {e:?}")))
}

/// Holds the one table currently on display.
#[derive(Debug, Default)]
pub struct TablePresenter {
    current: Option<ExtractedTable>,
}

impl TablePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and display `markup`, replacing any table already shown.
    ///
    /// On error the current table is left in place.
    pub fn present(&mut self, markup: &str) -> Result<&ExtractedTable> {
        let table = ExtractedTable::parse(markup)?;
        if self.current.is_some() {
            debug!("replacing previously presented table");
        }
        Ok(&*self.current.insert(table))
    }

    pub fn current(&self) -> Option<&ExtractedTable> {
        self.current.as_ref()
    }

    /// Number of tables on display: 0 or 1.
    pub fn count(&self) -> usize {
        usize::from(self.current.is_some())
    }

    /// Hand the current table's grid to `writer`.
    pub fn export(&self, writer: &dyn SpreadsheetWriter, path: &std::path::Path) -> Result<()> {
        let table = self.current.as_ref().ok_or(Error::NoTable)?;
        writer.write(&table.rows, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = "<html><body><table>\
        <thead><tr><th>Item</th><th>Qty</th></tr></thead>\
        <tbody><tr><td> Bolts </td><td>12</td></tr>\
        <tr><td>Nuts</td><td>7</td></tr></tbody>\
        </table></body></html>";

    #[test]
    fn parses_rows_and_cells() {
        let table = ExtractedTable::parse(MARKUP).unwrap();
        assert_eq!(
            table.rows,
            vec![
                vec!["Item".to_string(), "Qty".to_string()],
                vec!["Bolts".to_string(), "12".to_string()],
                vec!["Nuts".to_string(), "7".to_string()],
            ]
        );
        assert!(table.markup.starts_with("<table>"));
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn cell_text_includes_nested_elements() {
        let table =
            ExtractedTable::parse("<table><tr><td><b>Total</b> due</td></tr></table>").unwrap();
        assert_eq!(table.rows[0][0], "Total due");
    }

    #[test]
    fn markup_without_table_fails() {
        let err = ExtractedTable::parse("<p>nothing here</p>").unwrap_err();
        assert!(matches!(err, Error::NoTableMarkup));
    }

    #[test]
    fn markdown_pads_ragged_rows_and_escapes_pipes() {
        let table = ExtractedTable {
            markup: String::new(),
            rows: vec![
                vec!["A".into(), "B".into(), "C".into()],
                vec!["1|2".into()],
            ],
        };
        let md = table.to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines[0], "| A | B | C |");
        assert_eq!(lines[1], "| --- | --- | --- |");
        assert_eq!(lines[2], "| 1\\|2 |  |  |");
    }

    #[test]
    fn empty_table_renders_nothing() {
        let table = ExtractedTable::parse("<table></table>").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.to_markdown(), "");
    }

    #[test]
    fn presenter_keeps_single_table() {
        let mut presenter = TablePresenter::new();
        assert_eq!(presenter.count(), 0);
        presenter.present(MARKUP).unwrap();
        presenter
            .present("<table><tr><td>only</td></tr></table>")
            .unwrap();
        assert_eq!(presenter.count(), 1);
        assert_eq!(presenter.current().unwrap().rows, vec![vec!["only".to_string()]]);
    }

    #[test]
    fn failed_present_keeps_previous_table() {
        let mut presenter = TablePresenter::new();
        presenter.present(MARKUP).unwrap();
        assert!(presenter.present("no table").is_err());
        assert_eq!(presenter.current().unwrap().row_count(), 3);
    }

    #[test]
    fn export_without_table_fails() {
        let presenter = TablePresenter::new();
        let err = presenter
            .export(&XlsxWriter::default(), std::path::Path::new("unused.xlsx"))
            .unwrap_err();
        assert!(matches!(err, Error::NoTable));
    }
}
