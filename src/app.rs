//! [`TextLab`]: the extractor, the dispatcher and the result writer behind
//! one handle.
//!
//! This is the primary entry point for the library. A `TextLab` owns its
//! transform cache, so keep one instance alive for as long as repeated
//! requests should be served from memory.

use crate::cache::TransformCache;
use crate::collaborators::{Collaborators, Translator};
use crate::config::{TextLabConfig, TranslationBackend};
use crate::document::Document;
use crate::error::TextLabError;
use crate::output::TransformResult;
use crate::pipeline::docx::DocxRsReader;
use crate::pipeline::extract::Extractor;
use crate::pipeline::google::GoogleWebTranslator;
use crate::pipeline::input;
use crate::pipeline::llm::{
    resolve_provider, LlmAugmenter, LlmBackend, LlmLanguageDetector, LlmSummarizer, LlmTranslator,
};
use crate::pipeline::ocr::VisionOcrEngine;
use crate::pipeline::pdf::PdfiumTextReader;
use crate::transform::{TransformDispatcher, TransformMode};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Build the default collaborator set for `config`.
///
/// Resolves the LLM provider (see [`resolve_provider`]) and wires every
/// LLM-backed adapter to it. The translator follows
/// [`TextLabConfig::translation_backend`].
pub fn default_collaborators(config: &TextLabConfig) -> Result<Collaborators, TextLabError> {
    let provider = resolve_provider(config)?;
    info!(
        "LLM collaborators ready (translation via {:?})",
        config.translation_backend
    );
    let backend = Arc::new(LlmBackend::new(provider, config));

    let translator: Arc<dyn Translator> = match config.translation_backend {
        TranslationBackend::Llm => Arc::new(LlmTranslator::new(Arc::clone(&backend))),
        TranslationBackend::GoogleWeb => {
            Arc::new(GoogleWebTranslator::new(config.api_timeout_secs)?)
        }
    };

    Ok(Collaborators {
        pdf: Arc::new(PdfiumTextReader::new(config.pdfium_lib_path.clone())),
        ocr: Arc::new(VisionOcrEngine::new(Arc::clone(&backend))),
        docx: Arc::new(DocxRsReader),
        detector: Arc::new(LlmLanguageDetector::new(Arc::clone(&backend))),
        translator,
        summarizer: Arc::new(LlmSummarizer::new(Arc::clone(&backend))),
        augmenter: Arc::new(LlmAugmenter::new(backend)),
    })
}

/// Extraction, transformation and download for one user session.
///
/// # Example
/// ```rust,no_run
/// use edgequake_textlab::{TargetLanguage, TextLab, TextLabConfig, TransformMode};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut lab = TextLab::from_config(TextLabConfig::default())?;
/// let text = lab.extract_input("report.pdf").await?;
/// let mode = TransformMode::Translate { target: TargetLanguage::French };
/// let result = lab.transform(&mode, &text).await?;
/// println!("{}", result.text);
/// lab.save(&result).await?;
/// # Ok(())
/// # }
/// ```
pub struct TextLab {
    config: TextLabConfig,
    extractor: Extractor,
    dispatcher: TransformDispatcher,
}

impl TextLab {
    /// Build with the default collaborators.
    pub fn from_config(config: TextLabConfig) -> Result<Self, TextLabError> {
        let collaborators = default_collaborators(&config)?;
        Ok(Self::with_collaborators(config, collaborators))
    }

    /// Build with caller-supplied collaborators and an empty cache.
    pub fn with_collaborators(config: TextLabConfig, collaborators: Collaborators) -> Self {
        Self::with_cache(config, collaborators, TransformCache::new())
    }

    /// Build with caller-supplied collaborators and cache.
    pub fn with_cache(
        config: TextLabConfig,
        collaborators: Collaborators,
        cache: TransformCache,
    ) -> Self {
        let extractor = Extractor::new(
            Arc::clone(&collaborators.pdf),
            Arc::clone(&collaborators.ocr),
            Arc::clone(&collaborators.docx),
            config.page_separator.clone(),
        )
        .with_progress(config.progress_callback.clone());

        let dispatcher = TransformDispatcher::new(&collaborators, cache)
            .with_summary_max_length(config.summary_max_length)
            .with_progress(config.progress_callback.clone());

        Self {
            config,
            extractor,
            dispatcher,
        }
    }

    pub fn config(&self) -> &TextLabConfig {
        &self.config
    }

    pub fn cache(&self) -> &TransformCache {
        self.dispatcher.cache()
    }

    /// Drop every cached result.
    pub fn clear_cache(&mut self) {
        self.dispatcher.cache_mut().clear();
    }

    /// Read a local path or download a URL, honouring the configured limits.
    pub async fn load(&self, path_or_url: &str) -> Result<Document, TextLabError> {
        input::resolve_input(
            path_or_url,
            self.config.download_timeout_secs,
            self.config.max_upload_bytes,
        )
        .await
    }

    /// Extract the text of an uploaded document.
    pub async fn extract(&self, doc: &Document) -> Result<String, TextLabError> {
        if doc.size_bytes() > self.config.max_upload_bytes {
            return Err(TextLabError::InputTooLarge {
                name: doc.filename.clone(),
                size: doc.size_bytes(),
                limit: self.config.max_upload_bytes,
            });
        }
        self.extractor.extract_document(doc).await
    }

    /// [`load`](Self::load) then [`extract`](Self::extract).
    pub async fn extract_input(&self, path_or_url: &str) -> Result<String, TextLabError> {
        let doc = self.load(path_or_url).await?;
        self.extract(&doc).await
    }

    pub async fn transform(
        &mut self,
        mode: &TransformMode,
        text: &str,
    ) -> Result<TransformResult, TextLabError> {
        self.dispatcher.transform(mode, text).await
    }

    pub async fn detect_language(&self, text: &str) -> Result<String, TextLabError> {
        self.dispatcher.detect_language(text).await
    }

    /// Write `result` into the configured output directory.
    pub async fn save(&self, result: &TransformResult) -> Result<PathBuf, TextLabError> {
        result.write_to_dir(&self.config.output_dir).await
    }

    /// Synchronous wrapper around [`transform`](Self::transform).
    ///
    /// Creates a temporary tokio runtime internally; do not call from
    /// inside an async context.
    pub fn transform_sync(
        &mut self,
        mode: &TransformMode,
        text: &str,
    ) -> Result<TransformResult, TextLabError> {
        new_runtime()?.block_on(self.transform(mode, text))
    }

    /// Synchronous wrapper around [`extract`](Self::extract).
    pub fn extract_sync(&self, doc: &Document) -> Result<String, TextLabError> {
        new_runtime()?.block_on(self.extract(doc))
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime, TextLabError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| TextLabError::Internal(format!("Failed to create tokio runtime: {e}")))
}
