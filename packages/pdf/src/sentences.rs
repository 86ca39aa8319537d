//! Bracket-aware sentence splitting.

/// Splits `text` into sentences at periods that are outside parentheses.
///
/// The closing period stays with its sentence and every sentence is
/// trimmed. Trailing text without a period is kept as a final sentence.
/// Brackets do not nest: any `)` closes the current bracket region.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut inside_brackets = false;

    for ch in text.chars() {
        match ch {
            '(' => inside_brackets = true,
            ')' => inside_brackets = false,
            _ => {}
        }
        current.push(ch);

        if ch == '.' && !inside_brackets {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_owned());
    }
}
