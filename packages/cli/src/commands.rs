//! Pipeline runners shared by the subcommands and the interactive menu.

use std::path::Path;

use remedy_cli_utils::{IndicatifProgress, MultiProgress};
use remedy_models::config::Config;
use remedy_pdf::KeynotesPipeline;
use remedy_scraper::PhytochemicalScraper;

pub const DEFAULT_KEYNOTES_PDF: &str = "keynotes-and-characteristics-allen.pdf";
pub const DEFAULT_KEYNOTES_CSV: &str = "cleaned_output.csv";
pub const DEFAULT_PLANTS_CSV: &str = "plants.csv";
pub const DEFAULT_PHYTOCHEMICALS_CSV: &str = "phytochemical_table_data.csv";

/// Runs the Keynotes PDF pipeline.
///
/// # Errors
///
/// Returns an error if the PDF cannot be extracted or the CSV cannot be
/// written.
pub fn keynotes(
    config: &Config,
    input: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = KeynotesPipeline::new(config.keynotes.clone());
    let summary = pipeline.run(input, output)?;

    log::info!(
        "{} rows from {} drugs ({} fragments dropped)",
        summary.written,
        summary.drugs,
        summary.dropped
    );

    Ok(())
}

/// Runs the phytochemical scrape with a progress bar over plants.
///
/// # Errors
///
/// Returns an error if the plant list cannot be read, the scraper cannot
/// be configured, or the CSV cannot be written.
pub async fn phytochemicals(
    multi: &MultiProgress,
    config: &Config,
    plants: &Path,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let scraper = PhytochemicalScraper::from_config(&config.phytochemicals)?;
    let progress = IndicatifProgress::steps_bar(multi, "Scraping plants");

    let report = scraper.run(plants, output, &progress).await?;

    if !report.skipped.is_empty() {
        log::warn!(
            "Skipped {} plants: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }

    Ok(())
}
