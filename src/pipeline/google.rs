//! Translation through the public Google Translate web endpoint.
//!
//! No API key is involved: this is the same `translate_a/single` endpoint
//! the browser widget calls. The response is a nested JSON array whose first
//! element lists the translated segments; their first fields concatenate to
//! the full translation.

use crate::collaborators::Translator;
use crate::error::TextLabError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

pub struct GoogleWebTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleWebTranslator {
    pub fn new(timeout_secs: u64) -> Result<Self, TextLabError> {
        Self::with_endpoint(ENDPOINT, timeout_secs)
    }

    /// Point the translator at another host serving the same protocol.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, TextLabError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TextLabError::collaborator("translate", e))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
pub fn parse_segments(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            out.push_str(piece);
        }
    }
    Some(out)
}

#[async_trait]
impl Translator for GoogleWebTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, TextLabError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TextLabError::collaborator("translate", e))?;

        if !response.status().is_success() {
            return Err(TextLabError::collaborator(
                "translate",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TextLabError::collaborator("translate", format!("bad response: {e}")))?;

        let translated = parse_segments(&body).ok_or_else(|| {
            TextLabError::collaborator("translate", "response has no translated segments")
        })?;
        debug!("Google translated {} chars → {} chars", text.len(), translated.len());
        Ok(translated)
    }
}
