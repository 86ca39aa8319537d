//! CSV output for Keynotes rows.

use std::io::Write;
use std::path::Path;

use remedy_models::{KeynoteColumn, KeynoteRow};

use crate::PdfError;

/// Writes the header and `rows` as CSV to `writer`.
///
/// The header comes from the first serialized row. With no rows it is
/// written from [`KeynoteColumn::ALL`] instead.
///
/// # Errors
///
/// Returns [`PdfError::Csv`] if writing fails.
pub fn write_csv<W: Write>(rows: &[KeynoteRow], writer: W) -> Result<(), PdfError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    if rows.is_empty() {
        csv_writer.write_record(KeynoteColumn::ALL.iter().map(ToString::to_string))?;
    }
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Creates (or truncates) `path` and writes `rows` to it.
///
/// # Errors
///
/// Returns [`PdfError`] if the file cannot be created or written.
pub fn write_csv_file(rows: &[KeynoteRow], path: &Path) -> Result<(), PdfError> {
    let file = std::fs::File::create(path)?;
    write_csv(rows, std::io::BufWriter::new(file))?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
