//! Contracts for the external libraries and services the front-end relies on.
//!
//! None of these are implemented here: a PDF reader, an OCR engine, a DOCX
//! reader, a language detector, a translator, a summarizer and a synonym
//! augmenter are consumed through the traits below. Default adapters live
//! in [`crate::pipeline`]; tests swap in their own.
//!
//! PDF and DOCX parsing are CPU-bound library calls and stay synchronous;
//! everything that may hit the network is async.

use crate::error::TextLabError;
use async_trait::async_trait;
use image::DynamicImage;
use std::sync::Arc;

/// Reads the text layer of a PDF, one string per page in document order.
pub trait PdfTextReader: Send + Sync {
    fn pages_of(&self, bytes: &[u8]) -> Result<Vec<String>, TextLabError>;
}

/// Reads the body paragraphs of a DOCX file in document order.
pub trait DocxReader: Send + Sync {
    fn paragraphs_of(&self, bytes: &[u8]) -> Result<Vec<String>, TextLabError>;
}

/// Turns an image into the text printed on it.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn image_to_text(&self, image: &DynamicImage) -> Result<String, TextLabError>;
}

/// Identifies the language of a text.
///
/// Must fail with [`TextLabError::DetectionFailure`] rather than guess when
/// the text carries no usable signal.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<String, TextLabError>;
}

/// Translates text between two language codes.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TextLabError>;
}

/// Produces a summary of a text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// `max_length` is a length hint in words; `None` leaves it to the summarizer.
    async fn summarize(&self, text: &str, max_length: Option<usize>)
        -> Result<String, TextLabError>;
}

/// Output of a synonym-substitution augmenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmented {
    Single(String),
    Fragments(Vec<String>),
}

impl Augmented {
    /// Collapse into one string; fragments are joined with a single space.
    pub fn into_text(self) -> String {
        match self {
            Augmented::Single(s) => s,
            Augmented::Fragments(parts) => parts.join(" "),
        }
    }

    /// True when the joined text would carry nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Augmented::Single(s) => s.trim().is_empty(),
            Augmented::Fragments(parts) => parts.iter().all(|p| p.trim().is_empty()),
        }
    }
}

/// Rewrites a text by substituting synonyms.
#[async_trait]
pub trait Augmenter: Send + Sync {
    async fn augment(&self, text: &str) -> Result<Augmented, TextLabError>;
}

/// The full set of collaborators one [`crate::TextLab`] works with.
#[derive(Clone)]
pub struct Collaborators {
    pub pdf: Arc<dyn PdfTextReader>,
    pub ocr: Arc<dyn OcrEngine>,
    pub docx: Arc<dyn DocxReader>,
    pub detector: Arc<dyn LanguageDetector>,
    pub translator: Arc<dyn Translator>,
    pub summarizer: Arc<dyn Summarizer>,
    pub augmenter: Arc<dyn Augmenter>,
}
