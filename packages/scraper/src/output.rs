//! CSV output for scraped table rows.

use std::io::Write;
use std::path::Path;

use remedy_models::TableRow;

use crate::ScrapeError;

const ROW_TERMINATOR: &[u8] = b"\r\n";

/// Writes `rows` as flexible-width CSV without a header row.
///
/// Records end in `\r\n`. A row with no cells is written as an empty line,
/// while a row holding one empty cell is written as `""`.
///
/// # Errors
///
/// Returns [`ScrapeError`] if writing fails.
pub fn write_rows<W: Write>(rows: &[TableRow], mut writer: W) -> Result<(), ScrapeError> {
    let mut builder = csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::CRLF);

    for row in rows {
        if row.is_empty() {
            writer.write_all(ROW_TERMINATOR)?;
            continue;
        }
        let mut csv_writer = builder.from_writer(&mut writer);
        csv_writer.write_record(row.cells())?;
        csv_writer.flush()?;
    }
    writer.flush()?;

    Ok(())
}

/// Creates (or truncates) `path` and writes `rows` to it.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the file cannot be created or written.
pub fn write_rows_file(rows: &[TableRow], path: &Path) -> Result<(), ScrapeError> {
    let file = std::fs::File::create(path)?;
    write_rows(rows, std::io::BufWriter::new(file))?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
