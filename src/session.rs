//! Interactive terminal session.
//!
//! ```text
//! Select your choice
//!   1) Summarize Text      text area or upload → summary (+ primary speaker)
//!   2) Translate Text      text area → detected language → target → translation
//!   3) Paraphrase Text     text area or upload → paraphrase
//!   q) Quit
//! ```
//!
//! Each action shows the input next to the result and offers to save the
//! result under its download name. An error is printed and the session goes
//! back to the menu; only terminal I/O errors end it.

use crate::app::TextLab;
use crate::document::DocumentFormat;
use crate::error::TextLabError;
use crate::language::{describe_language_code, TargetLanguage};
use crate::transform::TransformMode;
use std::io::{self, BufRead, Write};

/// A line containing only this ends multi-line text entry.
pub const END_OF_TEXT: &str = ".";

/// ANSI styling, switched off for pipes and tests.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    fn paint(&self, code: &str, s: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }
    fn green(&self, s: &str) -> String {
        self.paint("32", s)
    }
    fn red(&self, s: &str) -> String {
        self.paint("31", s)
    }
    fn dim(&self, s: &str) -> String {
        self.paint("2", s)
    }
    fn bold(&self, s: &str) -> String {
        self.paint("1", s)
    }
    fn cyan(&self, s: &str) -> String {
        self.paint("36", s)
    }
}

/// Which action the user picked from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Summarize,
    Translate,
    Paraphrase,
    Quit,
}

fn parse_choice(line: &str) -> Option<Choice> {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" | "summarize" | "summarize text" => Some(Choice::Summarize),
        "2" | "translate" | "translate text" => Some(Choice::Translate),
        "3" | "paraphrase" | "paraphrase text" => Some(Choice::Paraphrase),
        "q" | "quit" | "exit" => Some(Choice::Quit),
        _ => None,
    }
}

/// Upload types offered per action. The paraphrase uploader also lists csv,
/// which the extractor then rejects as unsupported.
fn accepted_uploads(choice: Choice) -> Vec<&'static str> {
    let mut tags = DocumentFormat::SUPPORTED_TAGS.to_vec();
    if choice == Choice::Paraphrase {
        tags.insert(5, "csv");
    }
    tags
}

pub struct Session<R, W> {
    lab: TextLab,
    input: R,
    output: W,
    palette: Palette,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(lab: TextLab, input: R, output: W, palette: Palette) -> Self {
        Self {
            lab,
            input,
            output,
            palette,
        }
    }

    /// Hand the lab back, e.g. to inspect its cache.
    pub fn into_lab(self) -> TextLab {
        self.lab
    }

    /// Run the menu loop until the user quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", self.palette.bold("Select your choice"))?;
            writeln!(self.output, "  1) Summarize Text")?;
            writeln!(self.output, "  2) Translate Text")?;
            writeln!(self.output, "  3) Paraphrase Text")?;
            writeln!(self.output, "  q) Quit")?;

            let Some(line) = self.prompt("> ")? else {
                return Ok(());
            };
            let outcome = match parse_choice(&line) {
                Some(Choice::Quit) => return Ok(()),
                Some(Choice::Translate) => self.translate_action().await?,
                Some(choice) => self.upload_or_type_action(choice).await?,
                None => {
                    writeln!(self.output, "Please pick 1, 2, 3 or q.")?;
                    continue;
                }
            };
            if let Err(e) = outcome {
                let message = e.to_string();
                writeln!(
                    self.output,
                    "{} {}",
                    self.palette.red("✗"),
                    self.palette.red(&message)
                )?;
            }
        }
    }

    /// Summarize or paraphrase: typed text or an uploaded file.
    async fn upload_or_type_action(
        &mut self,
        choice: Choice,
    ) -> io::Result<Result<(), TextLabError>> {
        let (mode, heading, result_label) = match choice {
            Choice::Summarize => (TransformMode::Summarize, "Summarize Text", "Summary Result"),
            _ => (TransformMode::Paraphrase, "Paraphrase Text", "Paraphrase Result"),
        };
        writeln!(self.output, "{}", self.palette.cyan(heading))?;
        writeln!(self.output, "Choose input method  1) Text Area  2) Upload File")?;

        let Some(method) = self.prompt("> ")? else {
            return Ok(Ok(()));
        };
        let text = if method.trim() == "2" {
            let types = accepted_uploads(choice).join(", ");
            let Some(path) = self.prompt(&format!("Path or URL of a file ({types}): "))? else {
                return Ok(Ok(()));
            };
            match self.lab.extract_input(path.trim()).await {
                Ok(text) => text,
                Err(e) => return Ok(Err(e)),
            }
        } else {
            self.read_text_area()?
        };

        if text.trim().is_empty() {
            writeln!(self.output, "{}", self.palette.dim("No input text."))?;
            return Ok(Ok(()));
        }
        self.run_and_show(&mode, &text, result_label).await
    }

    async fn translate_action(&mut self) -> io::Result<Result<(), TextLabError>> {
        writeln!(self.output, "{}", self.palette.cyan("Translate Text"))?;
        let text = self.read_text_area()?;
        if text.trim().is_empty() {
            writeln!(self.output, "{}", self.palette.dim("No input text."))?;
            return Ok(Ok(()));
        }

        match self.lab.detect_language(&text).await {
            Ok(code) => writeln!(
                self.output,
                "Detected language: {}",
                self.palette.bold(&describe_language_code(&code))
            )?,
            Err(e) => return Ok(Err(e)),
        }

        writeln!(self.output, "Select target language")?;
        for (i, lang) in TargetLanguage::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, lang.name())?;
        }
        let target = loop {
            let Some(line) = self.prompt("> ")? else {
                return Ok(Ok(()));
            };
            match parse_target(&line) {
                Some(target) => break target,
                None => writeln!(self.output, "Unknown target language '{}'.", line.trim())?,
            }
        };

        let mode = TransformMode::Translate { target };
        self.run_and_show(&mode, &text, "Translation Result").await
    }

    async fn run_and_show(
        &mut self,
        mode: &TransformMode,
        text: &str,
        result_label: &str,
    ) -> io::Result<Result<(), TextLabError>> {
        let result = match self.lab.transform(mode, text).await {
            Ok(r) => r,
            Err(e) => return Ok(Err(e)),
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.bold("Your Input Text"))?;
        writeln!(self.output, "{text}")?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.bold(result_label))?;
        writeln!(self.output, "{}", self.palette.green(&result.text))?;
        if result.cached {
            writeln!(self.output, "{}", self.palette.dim("(cached)"))?;
        }

        let filename = result.download_filename();
        let Some(answer) = self.prompt(&format!("Download result as {filename}? [y/N] "))? else {
            return Ok(Ok(()));
        };
        if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            match self.lab.save(&result).await {
                Ok(path) => writeln!(
                    self.output,
                    "{} Saved {}",
                    self.palette.green("✔"),
                    path.display()
                )?,
                Err(e) => return Ok(Err(e)),
            }
        }
        Ok(Ok(()))
    }

    /// Multi-line entry, ended by a line holding only [`END_OF_TEXT`] or by EOF.
    fn read_text_area(&mut self) -> io::Result<String> {
        writeln!(
            self.output,
            "Enter your text here {}",
            self.palette
                .dim(&format!("(finish with a line containing only '{END_OF_TEXT}')"))
        )?;
        self.output.flush()?;

        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line == END_OF_TEXT {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    /// Print `msg`, read one line. `None` on EOF.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Menu number, language name or code. Empty input picks the first entry.
fn parse_target(line: &str) -> Option<TargetLanguage> {
    let line = line.trim();
    if line.is_empty() {
        return Some(TargetLanguage::ALL[0]);
    }
    if let Ok(n) = line.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| TargetLanguage::ALL.get(i).copied());
    }
    line.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices() {
        assert_eq!(parse_choice("1"), Some(Choice::Summarize));
        assert_eq!(parse_choice(" Translate Text "), Some(Choice::Translate));
        assert_eq!(parse_choice("3"), Some(Choice::Paraphrase));
        assert_eq!(parse_choice("Q"), Some(Choice::Quit));
        assert_eq!(parse_choice("4"), None);
    }

    #[test]
    fn target_selection() {
        assert_eq!(parse_target(""), Some(TargetLanguage::English));
        assert_eq!(parse_target("6"), Some(TargetLanguage::French));
        assert_eq!(parse_target("9"), Some(TargetLanguage::Chinese));
        assert_eq!(parse_target("0"), None);
        assert_eq!(parse_target("10"), None);
        assert_eq!(parse_target("tamil"), Some(TargetLanguage::Tamil));
        assert_eq!(parse_target("ur"), Some(TargetLanguage::Urdu));
        assert_eq!(parse_target("Klingon"), None);
    }

    #[test]
    fn paraphrase_uploader_lists_csv() {
        assert!(!accepted_uploads(Choice::Summarize).contains(&"csv"));
        assert_eq!(
            accepted_uploads(Choice::Paraphrase),
            vec!["pdf", "png", "jpg", "jpeg", "txt", "csv", "docx"]
        );
    }

    #[test]
    fn palette_off_is_plain() {
        let p = Palette { color: false };
        assert_eq!(p.green("ok"), "ok");
        let p = Palette { color: true };
        assert_eq!(p.red("x"), "\x1b[31mx\x1b[0m");
    }
}
