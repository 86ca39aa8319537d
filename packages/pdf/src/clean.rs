//! Post-parse cleanup of symptom rows.
//!
//! Sentence splitting leaves behind fragments such as a lone `).` or an
//! initial like `C.` from an abbreviated author name. Those rows are
//! dropped, and bracketed cross-references are stripped from the rest.

use std::sync::LazyLock;

use regex::Regex;
use remedy_models::KeynoteRow;

/// A closing bracket, a double quote or a single letter followed by a
/// period, with nothing else but whitespace.
static FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(\)|"|[a-zA-Z])\.\s*$"#).expect("valid regex"));

static BRACKETED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid regex"));

static UNCLOSED_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*$").expect("valid regex"));

/// Returns `true` if `symptom` is a splitting fragment rather than a
/// real sentence.
#[must_use]
pub fn is_unwanted_symptom(symptom: &str) -> bool {
    symptom == "." || FRAGMENT_RE.is_match(symptom)
}

/// Removes complete `(...)` groups, then an unclosed `(` and everything
/// after it.
#[must_use]
pub fn clean_symptom(symptom: &str) -> String {
    let without_groups = BRACKETED_RE.replace_all(symptom, "");
    let without_groups = without_groups.trim();
    UNCLOSED_BRACKET_RE
        .replace(without_groups, "")
        .trim()
        .to_owned()
}

/// Drops fragment rows and strips brackets from the remaining symptoms.
///
/// Fragments are detected on the raw symptom, before brackets are removed.
#[must_use]
pub fn clean_rows(rows: Vec<KeynoteRow>) -> Vec<KeynoteRow> {
    let before = rows.len();

    let cleaned: Vec<KeynoteRow> = rows
        .into_iter()
        .filter(|row| !is_unwanted_symptom(&row.symptom))
        .map(|mut row| {
            row.symptom = clean_symptom(&row.symptom);
            row
        })
        .collect();

    log::debug!("Removed {} fragment rows", before - cleaned.len());

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symptom: &str) -> KeynoteRow {
        KeynoteRow {
            drug: "Sulphur".to_owned(),
            name: "(Brimstone)".to_owned(),
            symptom: symptom.to_owned(),
            amelioration: String::new(),
            aggravation: String::new(),
        }
    }

    #[test]
    fn detects_fragments() {
        assert!(is_unwanted_symptom(")."));
        assert!(is_unwanted_symptom("\"."));
        assert!(is_unwanted_symptom("C."));
        assert!(is_unwanted_symptom("  x.  "));
        assert!(is_unwanted_symptom("."));
        assert!(!is_unwanted_symptom("Ab."));
        assert!(!is_unwanted_symptom("Burning, itching."));
        assert!(!is_unwanted_symptom("1."));
    }

    #[test]
    fn strips_complete_brackets() {
        assert_eq!(
            clean_symptom("Pain in ovary (compare Lach.) worse (left) at night."),
            "Pain in ovary  worse  at night."
        );
    }

    #[test]
    fn strips_unclosed_bracket_tail() {
        assert_eq!(clean_symptom("Chilly (worse in open air."), "Chilly");
        assert_eq!(clean_symptom("(see Bell.) Thirst (great"), "Thirst");
    }

    #[test]
    fn leaves_plain_sentences_alone() {
        assert_eq!(clean_symptom("Dirty, unwashed."), "Dirty, unwashed.");
    }

    #[test]
    fn cleans_rows_in_order() {
        let rows = vec![row("Burning (soles)."), row(")."), row("Itching (worse"), row(".")];
        let cleaned = clean_rows(rows);
        let symptoms: Vec<&str> = cleaned.iter().map(|r| r.symptom.as_str()).collect();
        assert_eq!(symptoms, vec!["Burning .", "Itching"]);
    }
}
