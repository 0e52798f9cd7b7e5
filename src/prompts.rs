//! System prompts for the LLM-backed collaborators.
//!
//! Every prompt lives here so it can be changed in one place and inspected by
//! unit tests without a live provider.

/// Summarization prompt. The user message is the full input text.
pub const SUMMARIZE_SYSTEM_PROMPT: &str = r#"You are a summarization engine. Summarize the text provided by the user.

Rules:
- Keep the facts, names and numbers of the original; add nothing.
- Write plain prose in the language of the original text.
- Output ONLY the summary: no title, no preamble, no Markdown fences."#;

/// Paraphrase prompt, modelled on synonym-substitution augmentation.
pub const PARAPHRASE_SYSTEM_PROMPT: &str = r#"You are a text augmenter. Rewrite the text provided by the user by replacing some words with synonyms.

Rules:
- Keep sentence structure, order and meaning unchanged.
- Replace roughly a third of the content words; keep names and numbers.
- Output ONLY the rewritten text. If you split it into fragments, output a JSON array of strings instead."#;

/// Language-identification prompt.
pub const DETECT_SYSTEM_PROMPT: &str = r#"You identify the language of the text provided by the user.

Answer with the ISO 639-1 code of the language (for example: en, fr, hi, zh-cn) and nothing else.
If the text contains no recognisable language, answer exactly: unknown"#;

/// OCR prompt for the vision model.
pub const OCR_SYSTEM_PROMPT: &str = r#"You are an OCR engine. Transcribe all text visible in the image.

Rules:
- Preserve reading order and line breaks.
- Do not describe the image, translate, or correct spelling.
- Output ONLY the transcribed text. If there is no text, output nothing."#;

/// Translation prompt for a given source/target pair.
pub fn translate_system_prompt(source_lang: &str, target_lang: &str) -> String {
    format!(
        "You are a translation engine. Translate the text provided by the user from \
         language '{source_lang}' to language '{target_lang}'.\n\n\
         Rules:\n\
         - Preserve line breaks and paragraph structure.\n\
         - Output ONLY the translation: no notes, no quotes, no Markdown fences."
    )
}

/// Length instruction appended to the summarization prompt when a limit is set.
pub fn summary_length_hint(max_words: usize) -> String {
    format!("\n- Use at most {max_words} words.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_prompt_names_both_languages() {
        let p = translate_system_prompt("fr", "en");
        assert!(p.contains("'fr'"));
        assert!(p.contains("'en'"));
    }

    #[test]
    fn detect_prompt_defines_unknown_answer() {
        assert!(DETECT_SYSTEM_PROMPT.contains("unknown"));
    }

    #[test]
    fn summary_hint_mentions_limit() {
        assert!(summary_length_hint(50).contains("50 words"));
    }
}
