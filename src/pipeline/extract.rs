//! Multi-format text extraction.
//!
//! [`Extractor::extract`] dispatches on the declared format tag:
//!
//! | tag | path |
//! |---|---|
//! | `pdf` | PDF reader, page texts joined with the configured [`PageSeparator`] |
//! | `png` `jpg` `jpeg` | image decode, then OCR; OCR text returned unmodified |
//! | `txt` | strict UTF-8 decode |
//! | `docx` | DOCX reader, paragraphs joined with `"\n"` |
//!
//! Anything else is [`TextLabError::UnsupportedFormat`]. Extraction has no
//! side effects; the same bytes and tag always produce the same text.

use crate::collaborators::{DocxReader, OcrEngine, PdfTextReader};
use crate::config::PageSeparator;
use crate::document::{Document, DocumentFormat};
use crate::error::TextLabError;
use crate::pipeline::encode::decode_image;
use crate::progress::ProgressCallback;
use std::sync::Arc;
use tracing::{debug, info};

pub struct Extractor {
    pdf: Arc<dyn PdfTextReader>,
    ocr: Arc<dyn OcrEngine>,
    docx: Arc<dyn DocxReader>,
    page_separator: PageSeparator,
    progress: Option<ProgressCallback>,
}

impl Extractor {
    pub fn new(
        pdf: Arc<dyn PdfTextReader>,
        ocr: Arc<dyn OcrEngine>,
        docx: Arc<dyn DocxReader>,
        page_separator: PageSeparator,
    ) -> Self {
        Self {
            pdf,
            ocr,
            docx,
            page_separator,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: Option<ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Turn raw bytes into text according to `format_tag`.
    pub async fn extract(&self, bytes: &[u8], format_tag: &str) -> Result<String, TextLabError> {
        let format = DocumentFormat::from_tag(format_tag).ok_or_else(|| {
            TextLabError::UnsupportedFormat {
                format: format_tag.to_string(),
            }
        })?;

        match format {
            DocumentFormat::Pdf => self.extract_pdf(bytes).await,
            DocumentFormat::Png | DocumentFormat::Jpg | DocumentFormat::Jpeg => {
                self.extract_image(bytes).await
            }
            DocumentFormat::Txt => decode_utf8(bytes),
            DocumentFormat::Docx => {
                let paragraphs = self.docx.paragraphs_of(bytes)?;
                Ok(paragraphs.join("\n"))
            }
        }
    }

    /// Extract an uploaded document, reporting progress around the call.
    pub async fn extract_document(&self, doc: &Document) -> Result<String, TextLabError> {
        info!("Extracting '{}' as {}", doc.filename, doc.format_tag);
        if let Some(cb) = &self.progress {
            cb.on_extraction_start(&doc.filename, &doc.format_tag);
        }

        match self.extract(&doc.bytes, &doc.format_tag).await {
            Ok(text) => {
                if let Some(cb) = &self.progress {
                    cb.on_extraction_complete(&doc.filename, text.chars().count());
                }
                Ok(text)
            }
            Err(e) => {
                if let Some(cb) = &self.progress {
                    cb.on_error("extract", &e.to_string());
                }
                Err(e)
            }
        }
    }

    async fn extract_pdf(&self, bytes: &[u8]) -> Result<String, TextLabError> {
        let reader = Arc::clone(&self.pdf);
        let owned = bytes.to_vec();

        // pdfium keeps thread-local state; keep it off the async workers.
        let pages = tokio::task::spawn_blocking(move || reader.pages_of(&owned))
            .await
            .map_err(|e| TextLabError::Internal(format!("PDF task panicked: {e}")))??;

        debug!("Joining {} PDF pages", pages.len());
        Ok(self.page_separator.join(&pages))
    }

    async fn extract_image(&self, bytes: &[u8]) -> Result<String, TextLabError> {
        let image = decode_image(bytes).map_err(|e| {
            TextLabError::collaborator("ocr", format!("could not decode image: {e}"))
        })?;
        self.ocr.image_to_text(&image).await
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, TextLabError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| TextLabError::Decode {
        detail: e.utf8_error().to_string(),
    })
}
