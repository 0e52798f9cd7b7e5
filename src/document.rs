//! Uploaded documents and their format tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A format the extractor knows how to turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Png,
    Jpg,
    Jpeg,
    Txt,
    Docx,
}

impl DocumentFormat {
    /// Tags accepted by the uploader, in the order they are listed to the user.
    pub const SUPPORTED_TAGS: [&'static str; 6] = ["pdf", "png", "jpg", "jpeg", "txt", "docx"];

    /// Parse a format tag such as `"pdf"` or `"JPG"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "txt" => Some(Self::Txt),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Txt => "txt",
            Self::Docx => "docx",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Derive the format tag from a filename: the text after the last `.`,
/// lower-cased. A name without a dot yields the whole name.
pub fn format_tag_of(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_lowercase()
}

/// Raw uploaded bytes plus the tag that decides how they are decoded.
///
/// Produced once by the input layer, consumed once by the extractor.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pub format_tag: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Build a document, deriving the format tag from `filename`.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let format_tag = format_tag_of(&filename);
        Self {
            filename,
            format_tag,
            bytes,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("filename", &self.filename)
            .field("format_tag", &self.format_tag)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}
