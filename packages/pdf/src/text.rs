//! PDF text extraction and front-matter removal.

use std::path::Path;

use crate::PdfError;

/// Extracts the text of every page of the PDF at `path`.
///
/// Form-feed page breaks are turned into newlines so that the last line of
/// one page never runs into the first line of the next.
///
/// # Errors
///
/// Returns [`PdfError::Io`] if the file cannot be read, or
/// [`PdfError::Extraction`] if it is not a readable PDF.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let bytes = std::fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "Extracted {} characters of text from {}",
        text.len(),
        path.display()
    );

    Ok(normalize_page_breaks(&text))
}

/// Replaces form feeds with newlines and guarantees a trailing newline.
#[must_use]
pub fn normalize_page_breaks(text: &str) -> String {
    let mut normalized = text.replace('\u{c}', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Drops everything up to and including the first occurrence of `marker`.
///
/// The remainder is trimmed. If `marker` does not occur the text is
/// returned unchanged.
#[must_use]
pub fn remove_introductory_text<'a>(text: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return text;
    }
    text.split_once(marker)
        .map_or(text, |(_, rest)| rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_text_before_marker() {
        let text = "Title page\nPreface\nCopyright © MEDI-T 1998\n\nAbrotanum.\n";
        assert_eq!(
            remove_introductory_text(text, "Copyright © MEDI-T 1998"),
            "Abrotanum."
        );
    }

    #[test]
    fn splits_on_first_marker_only() {
        let text = "intro MARK body MARK tail";
        assert_eq!(remove_introductory_text(text, "MARK"), "body MARK tail");
    }

    #[test]
    fn leaves_text_without_marker_untouched() {
        let text = "  Abrotanum.\n";
        assert_eq!(remove_introductory_text(text, "MARK"), text);
    }

    #[test]
    fn page_breaks_become_newlines() {
        assert_eq!(normalize_page_breaks("page one\u{c}page two"), "page one\npage two\n");
        assert_eq!(normalize_page_breaks(""), "");
    }
}
