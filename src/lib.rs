//! # edgequake-textlab
//!
//! Summarize, translate and paraphrase text that is typed in or extracted
//! from an uploaded document.
//!
//! The crate itself contains no NLP. Summarization, language detection,
//! translation, synonym augmentation, OCR and PDF/DOCX parsing are
//! collaborators behind traits ([`collaborators`]); the defaults talk to an
//! LLM provider through `edgequake-llm`, to pdfium, and to `docx-rs`.
//! What lives here is input acquisition, extraction dispatch, two text
//! heuristics, the cached transform dispatcher, and the front-ends.
//!
//! ## Pipeline Overview
//!
//! ```text
//! typed text ─────────────────────────────┐
//!                                         ▼
//! path / URL ─▶ Input ─▶ Extractor ─▶ text ─▶ TransformDispatcher ─▶ result ─▶ display / .txt
//!              (fs/http)  (by format tag)       │   ▲
//!                                              ▼   │
//!                                           TransformCache
//! ```
//!
//! * **summarize**: summarizer, plus `Primary Speaker: X` when the text
//!   looks like dialogue ([`heuristics`])
//! * **translate**: language detector, then translator into one of nine
//!   [`TargetLanguage`]s
//! * **paraphrase**: synonym augmenter
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_textlab::{TextLab, TextLabConfig, TransformMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / GEMINI_API_KEY
//!     let mut lab = TextLab::from_config(TextLabConfig::default())?;
//!     let result = lab
//!         .transform(&TransformMode::Summarize, "Alice: the build is green. Bob: ship it.")
//!         .await?;
//!     println!("{}", result.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `textlab` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! ```toml
//! edgequake-textlab = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod app;
pub mod cache;
pub mod collaborators;
pub mod config;
pub mod document;
pub mod error;
pub mod heuristics;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod session;
pub mod transform;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use app::{default_collaborators, TextLab};
pub use cache::{CacheKey, TransformCache};
pub use collaborators::{
    Augmented, Augmenter, Collaborators, DocxReader, LanguageDetector, OcrEngine, PdfTextReader,
    Summarizer, Translator,
};
pub use config::{PageSeparator, TextLabConfig, TextLabConfigBuilder, TranslationBackend};
pub use document::{format_tag_of, Document, DocumentFormat};
pub use error::TextLabError;
pub use heuristics::{detect_primary_speaker, is_dialogue, UNKNOWN_SPEAKER};
pub use language::TargetLanguage;
pub use output::TransformResult;
pub use pipeline::extract::Extractor;
pub use progress::{NoopProgressCallback, ProgressCallback, TransformProgressCallback};
pub use session::{Palette, Session};
pub use transform::{TransformDispatcher, TransformMode};
