//! Progress-callback trait for extraction and transformation events.
//!
//! Inject an [`Arc<dyn TransformProgressCallback>`] via
//! [`crate::config::TextLabConfigBuilder::progress_callback`] to hear about
//! each stage as it starts and finishes. Collaborator calls can take seconds
//! (OCR of a scanned page, a summary of a long report), so front-ends use
//! these events to show a spinner or a status line.
//!
//! # Example
//!
//! ```rust
//! use edgequake_textlab::{TextLabConfig, TransformProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     transforms: AtomicUsize,
//! }
//!
//! impl TransformProgressCallback for CountingCallback {
//!     fn on_transform_complete(&self, mode: &str, result_len: usize, cached: bool) {
//!         self.transforms.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{mode}: {result_len} chars (cached: {cached})");
//!     }
//! }
//!
//! let cb = Arc::new(CountingCallback { transforms: AtomicUsize::new(0) });
//! let config = TextLabConfig::builder()
//!     .progress_callback(cb as Arc<dyn TransformProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the extractor and dispatcher as they work.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait TransformProgressCallback: Send + Sync {
    /// Called before an uploaded document is decoded.
    fn on_extraction_start(&self, filename: &str, format_tag: &str) {
        let _ = (filename, format_tag);
    }

    /// Called after a document was turned into text.
    ///
    /// # Arguments
    /// * `filename` — the upload's name
    /// * `chars`    — number of characters extracted
    fn on_extraction_complete(&self, filename: &str, chars: usize) {
        let _ = (filename, chars);
    }

    /// Called before a transform runs (or is served from cache).
    fn on_transform_start(&self, mode: &str) {
        let _ = mode;
    }

    /// Called when a transform produced its result.
    ///
    /// # Arguments
    /// * `mode`       — "summarize", "translate" or "paraphrase"
    /// * `result_len` — length of the result text in characters
    /// * `cached`     — true when no collaborator was called
    fn on_transform_complete(&self, mode: &str, result_len: usize, cached: bool) {
        let _ = (mode, result_len, cached);
    }

    /// Called when a stage fails. The error is still returned to the caller.
    fn on_error(&self, stage: &str, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl TransformProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::TextLabConfig`].
pub type ProgressCallback = Arc<dyn TransformProgressCallback>;
