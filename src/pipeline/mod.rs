//! Input acquisition, extraction, and the default collaborator adapters.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ (pdf | encode+ocr | utf-8 | docx)
//! (path/URL)  (by tag)
//!
//! llm ──▶ postprocess        google
//! (chat)   (cleanup)         (web translate)
//! ```
//!
//! 1. [`input`]   — read a local file or download a URL into a [`crate::Document`]
//! 2. [`extract`] — dispatch on the format tag; the only place that knows
//!    which collaborator handles which format
//! 3. [`pdf`], [`docx`], [`ocr`] — document-reading adapters; pdfium runs
//!    in `spawn_blocking`
//! 4. [`llm`]     — summarizer, translator, detector and augmenter over one
//!    chat provider, plus provider resolution
//! 5. [`postprocess`] — deterministic cleanup of chat responses
//! 6. [`google`]  — alternative translator over the Google web endpoint

pub mod docx;
pub mod encode;
pub mod extract;
pub mod google;
pub mod input;
pub mod llm;
pub mod ocr;
pub mod pdf;
pub mod postprocess;
