//! Error type for the edgequake-textlab library.
//!
//! Every failure is terminal for the current interaction: there are no
//! partial results and nothing is retried automatically. The user fixes the
//! input and triggers the action again, so each variant carries a message
//! that tells them what to fix.
//!
//! The four variants the front-end is built around are:
//!
//! * [`TextLabError::UnsupportedFormat`] — the upload's extension has no
//!   extraction path.
//! * [`TextLabError::Decode`] — a `.txt` upload is not valid UTF-8.
//! * [`TextLabError::DetectionFailure`] — the source language of a text to
//!   translate could not be identified.
//! * [`TextLabError::CollaboratorFailure`] — an external library or service
//!   (summarizer, translator, OCR, PDF/DOCX reader, …) failed.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-textlab library.
#[derive(Debug, Error)]
pub enum TextLabError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The upload's format tag is not one of pdf, png, jpg, jpeg, txt, docx.
    #[error("Unsupported file format '{format}'\nSupported formats: pdf, png, jpg, jpeg, txt, docx.")]
    UnsupportedFormat { format: String },

    /// A plain-text upload is not valid UTF-8.
    #[error("Could not decode text upload as UTF-8: {detail}")]
    Decode { detail: String },

    /// There is no text to transform.
    #[error("Input text is empty.\nType some text or upload a document that contains text.")]
    EmptyInput,

    /// The upload exceeds the configured size limit.
    #[error("Upload '{name}' is {size} bytes, limit is {limit} bytes")]
    InputTooLarge { name: String, size: u64, limit: u64 },

    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Collaborator errors ───────────────────────────────────────────────
    /// The language of the input could not be identified.
    #[error("Could not detect the language of the input: {detail}\nTry a longer or less ambiguous text.")]
    DetectionFailure { detail: String },

    /// An external collaborator (summarizer, translator, OCR, document reader) failed.
    #[error("{stage} failed: {detail}")]
    CollaboratorFailure { stage: String, detail: String },

    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDF uploads need the pdfium shared library. You can:\n\
  • Install pdfium system-wide so it is on the loader path.\n\
  • Set PDFIUM_LIB_PATH=/path/to/dir/containing/libpdfium.\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write a downloaded result file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TextLabError {
    /// Shorthand for a [`TextLabError::CollaboratorFailure`].
    pub fn collaborator(stage: impl Into<String>, detail: impl ToString) -> Self {
        TextLabError::CollaboratorFailure {
            stage: stage.into(),
            detail: detail.to_string(),
        }
    }
}
