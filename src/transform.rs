//! The transform dispatcher: mode + text → result.
//!
//! ```text
//! summarize  : summarizer(text) [+ "\n\nPrimary Speaker: X" if dialogue]
//! translate  : detector(text) ─▶ translator(text, detected, target)
//! paraphrase : augmenter(text) ─▶ fragments joined with " "
//! ```
//!
//! Every successful result is stored in the injected [`TransformCache`]; an
//! identical request (same mode, same target, byte-identical text) is served
//! from there without touching any collaborator.

use crate::cache::TransformCache;
use crate::collaborators::{Augmenter, Collaborators, LanguageDetector, Summarizer, Translator};
use crate::error::TextLabError;
use crate::heuristics::{is_dialogue, speaker_annotation};
use crate::language::TargetLanguage;
use crate::output::TransformResult;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// What to do with the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TransformMode {
    Summarize,
    Translate { target: TargetLanguage },
    Paraphrase,
}

impl TransformMode {
    /// Lower-case mode name, also used as the error stage.
    pub fn label(&self) -> &'static str {
        match self {
            TransformMode::Summarize => "summarize",
            TransformMode::Translate { .. } => "translate",
            TransformMode::Paraphrase => "paraphrase",
        }
    }

    /// Conventional name of the downloaded result file.
    pub fn download_filename(&self) -> String {
        match self {
            TransformMode::Summarize => "summary.txt".to_string(),
            TransformMode::Translate { target } => format!("translate_{}.txt", target.name()),
            TransformMode::Paraphrase => "paraphrase.txt".to_string(),
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformMode::Translate { target } => write!(f, "translate to {target}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Routes a request to its collaborators and memoises the result.
pub struct TransformDispatcher {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    summarizer: Arc<dyn Summarizer>,
    augmenter: Arc<dyn Augmenter>,
    cache: TransformCache,
    summary_max_length: Option<usize>,
    progress: Option<ProgressCallback>,
}

impl TransformDispatcher {
    pub fn new(collaborators: &Collaborators, cache: TransformCache) -> Self {
        Self {
            detector: Arc::clone(&collaborators.detector),
            translator: Arc::clone(&collaborators.translator),
            summarizer: Arc::clone(&collaborators.summarizer),
            augmenter: Arc::clone(&collaborators.augmenter),
            cache,
            summary_max_length: None,
            progress: None,
        }
    }

    /// Length hint (in words) forwarded to the summarizer.
    pub fn with_summary_max_length(mut self, words: Option<usize>) -> Self {
        self.summary_max_length = words;
        self
    }

    pub fn with_progress(mut self, progress: Option<ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut TransformCache {
        &mut self.cache
    }

    /// Run `mode` over `text`.
    ///
    /// `detected_language` is only filled in when translate mode actually ran
    /// the detector; a cache hit skips detection.
    ///
    /// # Errors
    /// - [`TextLabError::EmptyInput`] for empty or whitespace-only text
    /// - [`TextLabError::DetectionFailure`] when the source language is unknown
    /// - whatever the collaborator returned, typically
    ///   [`TextLabError::CollaboratorFailure`]
    pub async fn transform(
        &mut self,
        mode: &TransformMode,
        text: &str,
    ) -> Result<TransformResult, TextLabError> {
        ensure_text(text)?;
        let label = mode.label();
        if let Some(cb) = &self.progress {
            cb.on_transform_start(label);
        }

        if let Some(hit) = self.cache.get(mode, text) {
            debug!("Cache hit for {mode} ({} chars of input)", text.len());
            self.report_complete(label, &hit, true);
            return Ok(TransformResult::new(*mode, hit, true, None));
        }

        info!("Running {mode} over {} chars", text.chars().count());
        let (output, detected) = match self.compute(mode, text).await {
            Ok(v) => v,
            Err(e) => {
                if let Some(cb) = &self.progress {
                    cb.on_error(label, &e.to_string());
                }
                return Err(e);
            }
        };

        let stored = self.cache.insert(mode, text, output);
        self.report_complete(label, &stored, false);
        Ok(TransformResult::new(*mode, stored, false, detected))
    }

    /// Identify the language of `text` without translating it.
    pub async fn detect_language(&self, text: &str) -> Result<String, TextLabError> {
        ensure_text(text)?;
        self.detector
            .detect(text)
            .await
            .map_err(|e| under_stage(e, "translate"))
    }

    async fn compute(
        &self,
        mode: &TransformMode,
        text: &str,
    ) -> Result<(String, Option<String>), TextLabError> {
        match mode {
            TransformMode::Summarize => {
                let summary = self
                    .summarizer
                    .summarize(text, self.summary_max_length)
                    .await?;
                if is_dialogue(text) {
                    Ok((format!("{summary}\n\n{}", speaker_annotation(text)), None))
                } else {
                    Ok((summary, None))
                }
            }
            TransformMode::Translate { target } => {
                let source = self
                    .detector
                    .detect(text)
                    .await
                    .map_err(|e| under_stage(e, mode.label()))?;
                debug!("Detected source language '{source}'");
                let translated = self
                    .translator
                    .translate(text, &source, target.code())
                    .await?;
                Ok((translated, Some(source)))
            }
            TransformMode::Paraphrase => {
                let augmented = self.augmenter.augment(text).await?;
                Ok((augmented.into_text(), None))
            }
        }
    }

    fn report_complete(&self, label: &str, result: &str, cached: bool) {
        if let Some(cb) = &self.progress {
            cb.on_transform_complete(label, result.chars().count(), cached);
        }
    }
}

/// Report a collaborator failure under the mode that triggered it.
fn under_stage(err: TextLabError, stage: &str) -> TextLabError {
    match err {
        TextLabError::CollaboratorFailure { detail, .. } => {
            TextLabError::collaborator(stage, detail)
        }
        other => other,
    }
}

fn ensure_text(text: &str) -> Result<(), TextLabError> {
    if text.trim().is_empty() {
        Err(TextLabError::EmptyInput)
    } else {
        Ok(())
    }
}
