#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row types and run configuration shared by the remedy data pipelines.
//!
//! The Keynotes PDF pipeline produces [`KeynoteRow`] records (one per
//! symptom sentence) and the phytochemical scraper produces [`TableRow`]
//! records taken verbatim from HTML tables. Both pipelines read their
//! tunable constants from [`config::Config`].

pub mod config;

use serde::Serialize;
use strum_macros::Display;

/// A single symptom sentence attributed to a drug.
///
/// Serializes as a CSV record whose header names match
/// [`KeynoteColumn::ALL`] in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeynoteRow {
    /// Drug header text with surrounding periods trimmed (e.g. `"Aconitum Napellus"`).
    pub drug: String,
    /// The drug's descriptive name line, usually containing a parenthesised
    /// common name.
    pub name: String,
    /// One symptom sentence.
    #[serde(rename = "Symptoms")]
    pub symptom: String,
    /// What makes the symptoms better. Empty when the entry has none.
    pub amelioration: String,
    /// What makes the symptoms worse. Empty when the entry has none.
    pub aggravation: String,
}

/// Output columns of the Keynotes CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum KeynoteColumn {
    Drug,
    Name,
    Symptoms,
    Amelioration,
    Aggravation,
}

impl KeynoteColumn {
    /// All columns in output order.
    pub const ALL: &[Self] = &[
        Self::Drug,
        Self::Name,
        Self::Symptoms,
        Self::Amelioration,
        Self::Aggravation,
    ];
}

/// A row of cell text scraped from an HTML table.
///
/// Width varies per row (header rows use `th`, body rows `td`) and no
/// schema is enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow(pub Vec<String>);

impl TableRow {
    /// Returns the cells of this row.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if the row has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TableRow {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_display_matches_csv_headers() {
        let headers: Vec<String> = KeynoteColumn::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            headers,
            vec!["Drug", "Name", "Symptoms", "Amelioration", "Aggravation"]
        );
    }
}
