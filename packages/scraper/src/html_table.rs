//! HTML table extraction.
//!
//! Locates the first element matching a CSS selector and turns every
//! `<tr>` beneath it into a [`TableRow`] of `th`/`td` cell text. No header
//! row is singled out: header and body rows are returned alike, in
//! document order.

use remedy_models::TableRow;
use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
///
/// # Errors
///
/// Returns [`ScrapeError::Selector`] if `selector` is not valid CSS.
pub fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Selector(format!("invalid CSS selector '{selector}': {e}")))
}

/// Row and cell selectors used inside the matched table.
#[derive(Debug, Clone)]
pub struct TableSelectors {
    table: Selector,
    row: Selector,
    cell: Selector,
}

impl TableSelectors {
    /// Builds selectors for the given table selector. Rows are `tr` and
    /// cells are `th, td`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if `table_selector` is not valid CSS.
    pub fn new(table_selector: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            table: parse_selector(table_selector)?,
            row: parse_selector("tr")?,
            cell: parse_selector("th, td")?,
        })
    }
}

/// Joins an element's text nodes, each stripped of surrounding whitespace,
/// with no separator.
#[must_use]
pub fn cell_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Extracts all rows from the first table in `html`.
///
/// Returns `None` if no element matches the table selector.
#[must_use]
pub fn parse_first_table(html: &str, selectors: &TableSelectors) -> Option<Vec<TableRow>> {
    let document = Html::parse_document(html);
    let table = document.select(&selectors.table).next()?;

    let rows: Vec<TableRow> = table
        .select(&selectors.row)
        .map(|row| TableRow::from(row.select(&selectors.cell).map(cell_text).collect::<Vec<_>>()))
        .collect();

    Some(rows)
}
