//! Plant name list input.

use std::io::Read;
use std::path::Path;

use crate::ScrapeError;

/// Reads plant names from a headerless CSV.
///
/// Every field of every row is a plant name, in file order. Rows may have
/// any number of fields. Fields are not passed through unchanged: each one
/// is trimmed, and a field that is blank after trimming is skipped rather
/// than requested as a plant.
///
/// # Errors
///
/// Returns [`ScrapeError::Csv`] if the input is not readable as CSV.
pub fn read_plant_names<R: Read>(reader: R) -> Result<Vec<String>, ScrapeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut names = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        names.extend(
            record
                .iter()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned),
        );
    }

    Ok(names)
}

/// Reads plant names from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`ScrapeError`] if the file cannot be opened or parsed.
pub fn read_plant_names_file(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let file = std::fs::File::open(path)?;
    let names = read_plant_names(file)?;
    log::info!("Read {} plant names from {}", names.len(), path.display());
    Ok(names)
}
