//! Configuration for extraction and transformation.
//!
//! Every knob lives in [`TextLabConfig`], built via [`TextLabConfigBuilder`].
//! Callers set what they care about and rely on the documented defaults for
//! the rest.

use crate::error::TextLabError;
use crate::progress::ProgressCallback;
use edgequake_llm::LLMProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Default upload limit: 200 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 200 * 1024 * 1024;

/// Configuration shared by the extractor, the collaborators and the dispatcher.
///
/// # Example
/// ```rust
/// use edgequake_textlab::{PageSeparator, TextLabConfig, TranslationBackend};
///
/// let config = TextLabConfig::builder()
///     .model("gpt-4.1-mini")
///     .translation_backend(TranslationBackend::GoogleWeb)
///     .page_separator(PageSeparator::Newline)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct TextLabConfig {
    /// LLM model identifier, e.g. "gpt-4.1-nano". If None, uses provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is detected from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature for summarize/translate/paraphrase calls. Default: 0.3.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate per call. Default: 2048.
    pub max_tokens: usize,

    /// Per-LLM-call timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Which collaborator performs translation. Default: [`TranslationBackend::Llm`].
    pub translation_backend: TranslationBackend,

    /// What goes between PDF pages. Default: [`PageSeparator::None`].
    ///
    /// The default glues the last word of one page to the first word of the
    /// next. Choose [`PageSeparator::Newline`] to keep page boundaries.
    pub page_separator: PageSeparator,

    /// Length hint forwarded to the summarizer, in words. Default: None (no limit).
    pub summary_max_length: Option<usize>,

    /// Reject uploads larger than this many bytes. Default: 200 MiB.
    pub max_upload_bytes: u64,

    /// Directory containing the pdfium shared library.
    /// If None, `PDFIUM_LIB_PATH` and then the system loader path are tried.
    pub pdfium_lib_path: Option<PathBuf>,

    /// Where downloaded results are written. Default: current directory.
    pub output_dir: PathBuf,

    /// Optional stage-event callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for TextLabConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.3,
            max_tokens: 2048,
            api_timeout_secs: 60,
            download_timeout_secs: 120,
            translation_backend: TranslationBackend::default(),
            page_separator: PageSeparator::default(),
            summary_max_length: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            pdfium_lib_path: None,
            output_dir: PathBuf::from("."),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for TextLabConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLabConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("translation_backend", &self.translation_backend)
            .field("page_separator", &self.page_separator)
            .field("summary_max_length", &self.summary_max_length)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl TextLabConfig {
    /// Create a new builder for `TextLabConfig`.
    pub fn builder() -> TextLabConfigBuilder {
        TextLabConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`TextLabConfig`].
#[derive(Debug)]
pub struct TextLabConfigBuilder {
    config: TextLabConfig,
}

impl TextLabConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn translation_backend(mut self, backend: TranslationBackend) -> Self {
        self.config.translation_backend = backend;
        self
    }

    pub fn page_separator(mut self, sep: PageSeparator) -> Self {
        self.config.page_separator = sep;
        self
    }

    pub fn summary_max_length(mut self, words: usize) -> Self {
        self.config.summary_max_length = Some(words);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<TextLabConfig, TextLabError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(TextLabError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(TextLabError::InvalidConfig(
                "api_timeout_secs must be ≥ 1".into(),
            ));
        }
        if c.max_upload_bytes == 0 {
            return Err(TextLabError::InvalidConfig(
                "max_upload_bytes must be ≥ 1".into(),
            ));
        }
        if c.summary_max_length == Some(0) {
            return Err(TextLabError::InvalidConfig(
                "summary_max_length must be ≥ 1 when set".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which collaborator translates text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TranslationBackend {
    /// The configured LLM provider. (default)
    #[default]
    Llm,
    /// The public Google Translate web endpoint (no API key).
    GoogleWeb,
}

/// How PDF page texts are joined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSeparator {
    /// Concatenate with nothing in between. (default)
    #[default]
    None,
    /// One newline between pages.
    Newline,
    /// Custom string inserted between pages.
    Custom(String),
}

impl PageSeparator {
    /// The string placed between two consecutive pages.
    pub fn as_str(&self) -> &str {
        match self {
            PageSeparator::None => "",
            PageSeparator::Newline => "\n",
            PageSeparator::Custom(s) => s,
        }
    }

    /// Join page texts in document order.
    pub fn join(&self, pages: &[String]) -> String {
        pages.join(self.as_str())
    }
}
