//! Input resolution: turn a user-supplied path or URL into a [`Document`].
//!
//! A local path is read from disk; an `http://` or `https://` URL is
//! downloaded into memory. Either way the result looks like an upload: a
//! filename (which decides the format tag) and the raw bytes. The size
//! limit is checked before the extractor ever sees the bytes.

use crate::document::Document;
use crate::error::TextLabError;
use std::path::PathBuf;
use tracing::{debug, info};

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve a path or URL to an in-memory document.
pub async fn resolve_input(
    input: &str,
    download_timeout_secs: u64,
    max_upload_bytes: u64,
) -> Result<Document, TextLabError> {
    if is_url(input) {
        download_url(input, download_timeout_secs, max_upload_bytes).await
    } else {
        read_local(input, max_upload_bytes).await
    }
}

/// Read a local file, mapping the common I/O failures to actionable errors.
async fn read_local(path_str: &str, max_upload_bytes: u64) -> Result<Document, TextLabError> {
    let path = PathBuf::from(path_str);

    let map_io = |e: std::io::Error, path: PathBuf| match e.kind() {
        std::io::ErrorKind::NotFound => TextLabError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => TextLabError::PermissionDenied { path },
        _ => TextLabError::Internal(format!("Failed to read '{}': {}", path.display(), e)),
    };

    let meta = tokio::fs::metadata(&path)
        .await
        .map_err(|e| map_io(e, path.clone()))?;
    if !meta.is_file() {
        return Err(TextLabError::FileNotFound { path });
    }

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_str.to_string());
    check_size(&filename, meta.len(), max_upload_bytes)?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| map_io(e, path.clone()))?;

    debug!("Read local upload: {} ({} bytes)", path.display(), bytes.len());
    Ok(Document::new(filename, bytes))
}

/// Download a URL into memory.
async fn download_url(
    url: &str,
    timeout_secs: u64,
    max_upload_bytes: u64,
) -> Result<Document, TextLabError> {
    info!("Downloading upload from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TextLabError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            TextLabError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            TextLabError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(TextLabError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let filename = extract_filename(url, content_type.as_deref());

    if let Some(len) = response.content_length() {
        check_size(&filename, len, max_upload_bytes)?;
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| TextLabError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    check_size(&filename, bytes.len() as u64, max_upload_bytes)?;

    info!("Downloaded {} ({} bytes)", filename, bytes.len());
    Ok(Document::new(filename, bytes.to_vec()))
}

fn check_size(name: &str, size: u64, limit: u64) -> Result<(), TextLabError> {
    if size > limit {
        return Err(TextLabError::InputTooLarge {
            name: name.to_string(),
            size,
            limit,
        });
    }
    Ok(())
}

/// Pick a filename for a downloaded upload.
///
/// The last URL path segment is used when it has an extension; otherwise the
/// extension is inferred from the `Content-Type` header.
pub fn extract_filename(url: &str, content_type: Option<&str>) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase());
    let ext = match mime.as_deref() {
        Some("application/pdf") => "pdf",
        Some("image/png") => "png",
        Some("image/jpeg") | Some("image/jpg") => "jpg",
        Some("text/plain") => "txt",
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => "docx",
        _ => "bin",
    };
    format!("download.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.pdf"));
        assert!(is_url("http://example.com/doc.pdf"));
        assert!(!is_url("/tmp/doc.pdf"));
        assert!(!is_url("doc.pdf"));
        assert!(!is_url(""));
    }

    #[test]
    fn filename_from_url_path() {
        assert_eq!(
            extract_filename("https://example.com/files/report.docx?x=1", None),
            "report.docx"
        );
    }

    #[test]
    fn filename_from_content_type() {
        assert_eq!(
            extract_filename("https://example.com/download", Some("application/pdf")),
            "download.pdf"
        );
        assert_eq!(
            extract_filename("https://example.com/", Some("text/plain; charset=utf-8")),
            "download.txt"
        );
        assert_eq!(extract_filename("https://example.com/x", None), "download.bin");
    }

    #[tokio::test]
    async fn reads_local_file() {
        let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        f.write_all(b"hello").unwrap();

        let doc = resolve_input(f.path().to_str().unwrap(), 5, 1024)
            .await
            .expect("local file should resolve");
        assert_eq!(doc.format_tag, "txt");
        assert_eq!(doc.bytes, b"hello");
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = resolve_input("/definitely/not/here.pdf", 5, 1024)
            .await
            .unwrap_err();
        assert!(matches!(err, TextLabError::FileNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn directory_is_not_an_upload() {
        let dir = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(resolve_input(dir.path().to_str().unwrap(), 5, 1024));
        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, TextLabError::FileNotFound { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        f.write_all(&[b'a'; 64]).unwrap();

        let err = resolve_input(f.path().to_str().unwrap(), 5, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, TextLabError::InputTooLarge { size: 64, limit: 10, .. }));
    }
}
