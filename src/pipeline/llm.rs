//! LLM-backed collaborators: summarizer, translator, language detector and
//! synonym augmenter.
//!
//! Every adapter shares one [`LlmBackend`], which owns the provider handle
//! and the completion options. Prompt text lives in [`crate::prompts`];
//! response cleanup in [`crate::pipeline::postprocess`].
//!
//! ## Failure model
//!
//! A call is bounded by `api_timeout_secs`. A provider error or a timeout
//! becomes [`TextLabError::CollaboratorFailure`] straight away: nothing is
//! retried, the user triggers the action again.

use crate::collaborators::{Augmented, Augmenter, LanguageDetector, Summarizer, Translator};
use crate::config::TextLabConfig;
use crate::error::TextLabError;
use crate::pipeline::postprocess::{clean_response, parse_augmented, parse_language_code};
use crate::prompts::{
    summary_length_hint, translate_system_prompt, DETECT_SYSTEM_PROMPT,
    PARAPHRASE_SYSTEM_PROMPT, SUMMARIZE_SYSTEM_PROMPT,
};
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

/// Default model when a provider is named without one.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// Characters of input sent to the language detector.
const DETECT_SAMPLE_CHARS: usize = 1000;

/// A provider plus the options every call is made with.
pub struct LlmBackend {
    provider: Arc<dyn LLMProvider>,
    temperature: f32,
    max_tokens: usize,
    timeout: Duration,
}

impl LlmBackend {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &TextLabConfig) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.api_timeout_secs),
        }
    }

    fn options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            ..Default::default()
        }
    }

    /// Send `messages` and return the raw response content.
    pub async fn chat(
        &self,
        stage: &str,
        messages: &[ChatMessage],
    ) -> Result<String, TextLabError> {
        let start = Instant::now();
        let options = self.options();

        let call = self.provider.chat(messages, Some(&options));
        let response = match timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!("{stage}: provider call failed — {e}");
                return Err(TextLabError::collaborator(stage, e));
            }
            Err(_) => {
                warn!("{stage}: provider call timed out after {:?}", self.timeout);
                return Err(TextLabError::collaborator(
                    stage,
                    format!("timed out after {}s", self.timeout.as_secs()),
                ));
            }
        };

        debug!(
            "{stage}: {} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }

    /// One system turn, one user turn.
    pub async fn complete(
        &self,
        stage: &str,
        system: &str,
        user: &str,
    ) -> Result<String, TextLabError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.chat(stage, &messages).await
    }
}

fn non_empty(stage: &str, text: String) -> Result<String, TextLabError> {
    if text.is_empty() {
        Err(TextLabError::collaborator(stage, "provider returned an empty response"))
    } else {
        Ok(text)
    }
}

// ── Summarizer ───────────────────────────────────────────────────────────────

pub struct LlmSummarizer {
    backend: Arc<LlmBackend>,
}

impl LlmSummarizer {
    pub fn new(backend: Arc<LlmBackend>) -> Self {
        Self { backend }
    }
}

fn summarize_prompt(max_length: Option<usize>) -> String {
    match max_length {
        Some(words) => format!("{SUMMARIZE_SYSTEM_PROMPT}{}", summary_length_hint(words)),
        None => SUMMARIZE_SYSTEM_PROMPT.to_string(),
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: Option<usize>,
    ) -> Result<String, TextLabError> {
        let raw = self
            .backend
            .complete("summarize", &summarize_prompt(max_length), text)
            .await?;
        non_empty("summarize", clean_response(&raw))
    }
}

// ── Translator ───────────────────────────────────────────────────────────────

pub struct LlmTranslator {
    backend: Arc<LlmBackend>,
}

impl LlmTranslator {
    pub fn new(backend: Arc<LlmBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TextLabError> {
        let system = translate_system_prompt(source_lang, target_lang);
        let raw = self.backend.complete("translate", &system, text).await?;
        non_empty("translate", clean_response(&raw))
    }
}

// ── Language detector ────────────────────────────────────────────────────────

pub struct LlmLanguageDetector {
    backend: Arc<LlmBackend>,
}

impl LlmLanguageDetector {
    pub fn new(backend: Arc<LlmBackend>) -> Self {
        Self { backend }
    }
}

/// Fails fast on text without a single letter; no model can name its language.
fn check_detectable(text: &str) -> Result<(), TextLabError> {
    if text.chars().any(char::is_alphabetic) {
        Ok(())
    } else {
        Err(TextLabError::DetectionFailure {
            detail: "the text contains no letters".into(),
        })
    }
}

fn detection_sample(text: &str) -> &str {
    match text.char_indices().nth(DETECT_SAMPLE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl LanguageDetector for LlmLanguageDetector {
    async fn detect(&self, text: &str) -> Result<String, TextLabError> {
        check_detectable(text)?;

        let raw = self
            .backend
            .complete("translate", DETECT_SYSTEM_PROMPT, detection_sample(text))
            .await?;

        parse_language_code(&raw).ok_or_else(|| TextLabError::DetectionFailure {
            detail: format!("detector answered {:?}", raw.trim()),
        })
    }
}

// ── Augmenter ────────────────────────────────────────────────────────────────

pub struct LlmAugmenter {
    backend: Arc<LlmBackend>,
}

impl LlmAugmenter {
    pub fn new(backend: Arc<LlmBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Augmenter for LlmAugmenter {
    async fn augment(&self, text: &str) -> Result<Augmented, TextLabError> {
        let raw = self
            .backend
            .complete("paraphrase", PARAPHRASE_SYSTEM_PROMPT, text)
            .await?;
        non_blank_augmented(&raw)
    }
}

fn non_blank_augmented(raw: &str) -> Result<Augmented, TextLabError> {
    let out = parse_augmented(raw);
    if out.is_blank() {
        return Err(TextLabError::collaborator(
            "paraphrase",
            "provider returned an empty response",
        ));
    }
    Ok(out)
}

// ── Provider resolution ──────────────────────────────────────────────────────

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, TextLabError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        TextLabError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider + model** (`config.provider_name`, model defaulting
///    to [`DEFAULT_MODEL`]). The factory reads the matching API key from the
///    environment.
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`),
///    honoured only when both are set and non-empty.
/// 4. **`OPENAI_API_KEY`** present: OpenAI with the configured model.
/// 5. **Full auto-detection** via [`ProviderFactory::from_env`].
pub fn resolve_provider(config: &TextLabConfig) -> Result<Arc<dyn LLMProvider>, TextLabError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_provider("openai", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| TextLabError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --provider.\n\
                Error: {e}"
            ),
        })?;

    Ok(llm_provider)
}
