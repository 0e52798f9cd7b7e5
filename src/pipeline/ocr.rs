//! OCR through a vision-capable chat model.
//!
//! The decoded image is re-encoded as PNG and attached to a single user turn;
//! the system turn asks for a verbatim transcription. The response is
//! returned exactly as the provider sent it.

use crate::collaborators::OcrEngine;
use crate::error::TextLabError;
use crate::pipeline::encode::encode_image;
use crate::pipeline::llm::LlmBackend;
use crate::prompts::OCR_SYSTEM_PROMPT;
use async_trait::async_trait;
use edgequake_llm::ChatMessage;
use image::DynamicImage;
use std::sync::Arc;

pub struct VisionOcrEngine {
    backend: Arc<LlmBackend>,
}

impl VisionOcrEngine {
    pub fn new(backend: Arc<LlmBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl OcrEngine for VisionOcrEngine {
    async fn image_to_text(&self, image: &DynamicImage) -> Result<String, TextLabError> {
        let image_data = encode_image(image).map_err(|e| {
            TextLabError::collaborator("ocr", format!("failed to encode image: {e}"))
        })?;

        // Empty user text: the image carries the content.
        let messages = [
            ChatMessage::system(OCR_SYSTEM_PROMPT),
            ChatMessage::user_with_images("", vec![image_data]),
        ];
        self.backend.chat("ocr", &messages).await
    }
}
