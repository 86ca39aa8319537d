//! Line-by-line segmentation of Keynotes text into symptom rows.
//!
//! Each drug entry in the book has the shape:
//!
//! ```text
//! Aconitum Napellus.
//! (Monkshood)
//! Fear of death. Restless, tossing about.
//! Aggravation. In evening and at night.
//! Amelioration. In open air.
//! Relationship. Complementary: Coffea, Sulphur.
//! ```
//!
//! [`KeynoteParser`] walks the lines in order, tracking the current drug,
//! its name line, the collected symptom sentences and the modality
//! sections, and emits one [`KeynoteRow`] per symptom when the next drug
//! header (or the end of the text) is reached.

use std::sync::LazyLock;

use regex::Regex;
use remedy_models::KeynoteRow;
use remedy_models::config::KeynotesConfig;

use crate::sentences::split_sentences;

/// A drug header: capitalised words, digits, spaces or hyphens ending in a
/// single period.
static DRUG_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9\s-]+\.$").expect("valid regex"));

/// A name line carries a parenthesised common name.
static NAME_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*\)").expect("valid regex"));

/// Returns `true` if the trimmed `line` starts a new drug entry.
#[must_use]
pub fn is_drug_header(line: &str) -> bool {
    DRUG_HEADER_RE.is_match(line)
}

/// Returns `true` if `line` contains a complete parenthesised group.
#[must_use]
pub fn is_name_line(line: &str) -> bool {
    NAME_LINE_RE.is_match(line)
}

/// Streaming parser state for one pass over the text.
///
/// Once an amelioration line has been seen, every later non-empty line of
/// the entry is appended to it, including an `Aggravation.` line. The same
/// holds for aggravation. Modalities are only cleared when a complete entry
/// (drug and name) is flushed.
#[derive(Debug)]
pub struct KeynoteParser<'a> {
    config: &'a KeynotesConfig,
    drug: Option<String>,
    name: Option<String>,
    symptoms: Vec<String>,
    amelioration: String,
    aggravation: String,
    skipping: bool,
    rows: Vec<KeynoteRow>,
}

impl<'a> KeynoteParser<'a> {
    #[must_use]
    pub const fn new(config: &'a KeynotesConfig) -> Self {
        Self {
            config,
            drug: None,
            name: None,
            symptoms: Vec::new(),
            amelioration: String::new(),
            aggravation: String::new(),
            skipping: false,
            rows: Vec::new(),
        }
    }

    /// Feeds one raw line of text to the parser.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();

        if contains_marker(line, &self.config.relationship_marker) {
            self.skipping = true;
            return;
        }
        if self.skipping {
            if line.is_empty() || is_drug_header(line) {
                self.skipping = false;
            } else {
                return;
            }
        }

        if contains_marker(line, &self.config.running_header) {
            return;
        }

        if is_drug_header(line) {
            self.flush();
            self.drug = Some(line.trim_matches('.').to_owned());
            self.name = None;
            return;
        }

        if self.name.is_none() && is_name_line(line) {
            self.name = Some(line.trim_matches('.').to_owned());
            return;
        }

        if contains_marker(line, &self.config.amelioration_marker) {
            self.amelioration = strip_marker(line, &self.config.amelioration_marker);
            return;
        }
        if !self.amelioration.is_empty() && !line.is_empty() {
            append_continuation(&mut self.amelioration, line);
            return;
        }

        if contains_marker(line, &self.config.aggravation_marker) {
            self.aggravation = strip_marker(line, &self.config.aggravation_marker);
            return;
        }
        if !self.aggravation.is_empty() && !line.is_empty() {
            append_continuation(&mut self.aggravation, line);
            return;
        }

        if self.drug.is_some() && self.name.is_some() {
            self.symptoms.extend(split_sentences(line));
        }
    }

    /// Flushes the last entry and returns every row produced.
    #[must_use]
    pub fn finish(mut self) -> Vec<KeynoteRow> {
        self.flush();
        self.rows
    }

    /// Emits rows for the current entry and clears its symptoms and
    /// modalities. Does nothing unless both a drug and a name are known.
    fn flush(&mut self) {
        let (Some(drug), Some(name)) = (&self.drug, &self.name) else {
            return;
        };

        let symptoms = std::mem::take(&mut self.symptoms);
        let amelioration = std::mem::take(&mut self.amelioration);
        let aggravation = std::mem::take(&mut self.aggravation);

        log::trace!("{drug}: {} symptoms", symptoms.len());

        self.rows.extend(symptoms.into_iter().map(|symptom| KeynoteRow {
            drug: drug.clone(),
            name: name.clone(),
            symptom,
            amelioration: amelioration.clone(),
            aggravation: aggravation.clone(),
        }));
    }
}

/// An empty marker never matches.
fn contains_marker(line: &str, marker: &str) -> bool {
    !marker.is_empty() && line.contains(marker)
}

fn strip_marker(line: &str, marker: &str) -> String {
    line.replace(marker, "").trim().to_owned()
}

fn append_continuation(section: &mut String, line: &str) {
    if !section.is_empty() {
        section.push(' ');
    }
    section.push_str(line);
}

/// Parses the body text of the book into unclean symptom rows.
#[must_use]
pub fn parse_text(text: &str, config: &KeynotesConfig) -> Vec<KeynoteRow> {
    let mut parser = KeynoteParser::new(config);
    for line in text.lines() {
        parser.push_line(line);
    }
    parser.finish()
}
