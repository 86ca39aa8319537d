#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Keynotes materia medica PDF extraction.
//!
//! Turns Allen's *Keynotes and Characteristics* into one CSV row per
//! symptom sentence. Text is pulled out with pure-Rust extraction
//! ([`pdf_extract`]), segmented line by line with a small state machine
//! ([`parser`]), cleaned of stray fragments and bracketed asides
//! ([`clean`]) and written with the `csv` crate ([`output`]).
//!
//! The primary entry point is [`KeynotesPipeline`].

pub mod clean;
pub mod output;
pub mod parser;
pub mod sentences;
pub mod text;

use std::collections::BTreeSet;
use std::path::Path;

use remedy_models::config::KeynotesConfig;

/// Errors specific to Keynotes extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Counts reported after a pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeynotesSummary {
    /// Distinct drugs that produced at least one row.
    pub drugs: usize,
    /// Rows produced by the parser before cleanup.
    pub parsed: usize,
    /// Rows removed as fragments during cleanup.
    pub dropped: usize,
    /// Rows written to the CSV.
    pub written: usize,
}

/// Runs extract, parse, clean and write for one PDF.
#[derive(Debug, Clone, Default)]
pub struct KeynotesPipeline {
    config: KeynotesConfig,
}

impl KeynotesPipeline {
    /// Creates a pipeline with the given segmentation markers.
    #[must_use]
    pub const fn new(config: KeynotesConfig) -> Self {
        Self { config }
    }

    /// Returns the segmentation markers in use.
    #[must_use]
    pub const fn config(&self) -> &KeynotesConfig {
        &self.config
    }

    /// Parses and cleans already-extracted PDF text.
    #[must_use]
    pub fn process_text(&self, text: &str) -> (Vec<remedy_models::KeynoteRow>, KeynotesSummary) {
        let body = text::remove_introductory_text(text, &self.config.intro_marker);
        let rows = parser::parse_text(body, &self.config);
        let parsed = rows.len();

        let cleaned = clean::clean_rows(rows);
        let drugs = cleaned
            .iter()
            .map(|row| row.drug.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        let summary = KeynotesSummary {
            drugs,
            parsed,
            dropped: parsed - cleaned.len(),
            written: cleaned.len(),
        };

        (cleaned, summary)
    }

    /// Extracts `input`, parses it and writes the cleaned rows to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfError`] if the PDF cannot be read or extracted, or the
    /// CSV cannot be written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<KeynotesSummary, PdfError> {
        log::info!("Extracting text from {}", input.display());
        let text = text::extract_text(input)?;

        let (rows, summary) = self.process_text(&text);
        log::debug!(
            "Parsed {} rows across {} drugs, dropped {} fragments",
            summary.parsed,
            summary.drugs,
            summary.dropped
        );

        output::write_csv_file(&rows, output)?;
        log::info!("Cleaned data saved to {}", output.display());

        Ok(summary)
    }
}
