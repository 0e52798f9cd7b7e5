//! Transform results and the downloadable result file.

use crate::error::TextLabError;
use crate::transform::TransformMode;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The outcome of one transform request.
#[derive(Debug, Clone, Serialize)]
pub struct TransformResult {
    #[serde(flatten)]
    pub mode: TransformMode,

    /// The transformed text. Shared with the cache.
    #[serde(serialize_with = "serialize_arc_str")]
    pub text: Arc<str>,

    /// True when served from the cache without calling a collaborator.
    pub cached: bool,

    /// Source language reported by the detector (translate mode, cache miss).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

fn serialize_arc_str<S: Serializer>(value: &Arc<str>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value)
}

impl TransformResult {
    pub fn new(
        mode: TransformMode,
        text: Arc<str>,
        cached: bool,
        detected_language: Option<String>,
    ) -> Self {
        Self {
            mode,
            text,
            cached,
            detected_language,
        }
    }

    /// `summary.txt`, `translate_<Language>.txt` or `paraphrase.txt`.
    pub fn download_filename(&self) -> String {
        self.mode.download_filename()
    }

    /// Write the result as `text/plain` into `dir` under its download name.
    pub async fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, TextLabError> {
        let path = dir.as_ref().join(self.download_filename());
        write_result_file(&path, &self.text).await?;
        Ok(path)
    }
}

/// Atomic write: temp file next to the target, then rename.
pub async fn write_result_file(path: &Path, contents: &str) -> Result<(), TextLabError> {
    let fail = |source: std::io::Error| TextLabError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(fail)?;
    }

    let tmp_path = path.with_extension("txt.tmp");
    tokio::fs::write(&tmp_path, contents).await.map_err(fail)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(fail(e));
    }

    info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::TargetLanguage;

    fn result(mode: TransformMode, text: &str) -> TransformResult {
        TransformResult::new(mode, Arc::from(text), false, None)
    }

    #[tokio::test]
    async fn writes_under_download_name() {
        let dir = tempfile::tempdir().unwrap();
        let r = result(
            TransformMode::Translate {
                target: TargetLanguage::Hindi,
            },
            "नमस्ते",
        );
        let path = r.write_to_dir(dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "translate_Hindi.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "नमस्ते");
        assert!(!dir.path().join("translate_Hindi.txt.tmp").exists());
    }

    #[tokio::test]
    async fn creates_missing_output_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("results");
        result(TransformMode::Summarize, "first").write_to_dir(&nested).await.unwrap();
        let path = result(TransformMode::Summarize, "second")
            .write_to_dir(&nested)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn serializes_flat_json() {
        let mut r = result(
            TransformMode::Translate {
                target: TargetLanguage::French,
            },
            "Bonjour",
        );
        r.detected_language = Some("en".into());
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["mode"], "translate");
        assert_eq!(v["target"], "French");
        assert_eq!(v["text"], "Bonjour");
        assert_eq!(v["cached"], false);
        assert_eq!(v["detected_language"], "en");

        let v = serde_json::to_value(result(TransformMode::Paraphrase, "p")).unwrap();
        assert_eq!(v["mode"], "paraphrase");
        assert!(v.get("detected_language").is_none());
    }
}
