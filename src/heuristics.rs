//! Dialogue and speaker heuristics used to annotate summaries.
//!
//! Both are deliberately naive, single-pass text scans:
//!
//! * [`is_dialogue`] is a presence check for quote, colon and hyphen
//!   characters. A clock time (`3:00`) or a hyphenated word is enough to
//!   classify a text as dialogue.
//! * [`detect_primary_speaker`] counts capitalised words. Sentence-initial
//!   common words and proper nouns compete with real speaker names on equal
//!   terms; it is a frequency count, not named-entity recognition.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Returned when the text contains no capitalised word.
pub const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

/// Characters whose presence marks a text as dialogue.
pub const DIALOGUE_MARKERS: [char; 4] = ['"', '\'', ':', '-'];

static CAPITALISED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]*\b").expect("valid capitalised-word regex"));

/// True if `text` contains any of `"`, `'`, `:` or `-`.
pub fn is_dialogue(text: &str) -> bool {
    text.contains(&DIALOGUE_MARKERS[..])
}

/// The most frequent capitalised word in `text`.
///
/// Tokens are matched with `\b[A-Z][a-z]*\b` and counted case-sensitively.
/// Among tokens sharing the highest count the one seen first wins. Returns
/// [`UNKNOWN_SPEAKER`] when nothing matches.
pub fn detect_primary_speaker(text: &str) -> String {
    // First-seen order is kept so ties resolve to the earliest token.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for m in CAPITALISED_WORD.find_iter(text) {
        let token = m.as_str();
        match slot.get(token) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(token, counts.len());
                counts.push((token, 1));
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for &(token, count) in &counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((token, count));
        }
    }

    best.map(|(token, _)| token.to_string())
        .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string())
}

/// The line appended to a summary of dialogue.
pub fn speaker_annotation(text: &str) -> String {
    format!("Primary Speaker: {}", detect_primary_speaker(text))
}
