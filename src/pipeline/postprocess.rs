//! Post-processing: deterministic cleanup of LLM-generated text.
//!
//! Chat models occasionally wrap plain answers in ```` ``` ```` fences, emit
//! `\r\n` line endings, or leave zero-width characters behind. These rules
//! fix such quirks without touching content; each is a pure `&str → String`
//! pass.
//!
//! OCR output is not run through here: the extractor hands the OCR engine's
//! text back unmodified.

use crate::collaborators::Augmented;
use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all cleanup rules to a raw chat response.
///
/// Rules (applied in order):
/// 1. Strip outer code fences
/// 2. Normalise line endings (CRLF → LF)
/// 3. Trim trailing whitespace per line
/// 4. Collapse 3+ consecutive newlines down to one blank line
/// 5. Strip invisible Unicode (zero-width spaces, BOM, soft hyphens)
/// 6. Trim leading and trailing whitespace
pub fn clean_response(input: &str) -> String {
    let s = strip_code_fences(input);
    let s = normalise_line_endings(&s);
    let s = trim_trailing_whitespace(&s);
    let s = collapse_blank_lines(&s);
    let s = remove_invisible_chars(&s);
    s.trim().to_string()
}

/// Interpret an augmenter response: a JSON array of strings becomes
/// [`Augmented::Fragments`], anything else a single text.
pub fn parse_augmented(response: &str) -> Augmented {
    let cleaned = clean_response(response);
    if cleaned.starts_with('[') {
        if let Ok(parts) = serde_json::from_str::<Vec<String>>(&cleaned) {
            return Augmented::Fragments(parts);
        }
    }
    Augmented::Single(cleaned)
}

/// Normalise a language-identification answer to a bare lower-case code.
///
/// Returns `None` for empty or `unknown` answers and for anything that does
/// not look like a code (`xx` or `xx-yy`).
pub fn parse_language_code(response: &str) -> Option<String> {
    let cleaned = clean_response(response);
    let code = cleaned
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.' || c.is_whitespace())
        .to_ascii_lowercase();
    if code.is_empty() || code == "unknown" || !RE_LANG_CODE.is_match(&code) {
        None
    } else {
        Some(code)
    }
}

static RE_LANG_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}(?:-[a-z]{2,4})?$").expect("valid language-code regex")
});

// ── Rule 1: Strip outer code fences ──────────────────────────────────────────

static RE_OUTER_FENCES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z0-9_-]*\n(.*)\n```\s*$").expect("valid fence regex")
});

fn strip_code_fences(input: &str) -> String {
    if let Some(caps) = RE_OUTER_FENCES.captures(input.trim()) {
        caps[1].to_string()
    } else {
        input.to_string()
    }
}

// ── Rule 2: Normalise line endings ───────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Rule 3: Trim trailing whitespace per line ────────────────────────────────

fn trim_trailing_whitespace(input: &str) -> String {
    input
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Rule 4: Collapse excessive blank lines ───────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank-line regex"));

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n\n").to_string()
}

// ── Rule 5: Remove invisible Unicode characters ─────────────────────────────

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

// ── Tests ────────────────────────────────────────────────────────────────────
