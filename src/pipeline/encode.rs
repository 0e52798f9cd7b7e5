//! Image decoding and encoding for the OCR path.
//!
//! Uploaded PNG/JPEG bytes are decoded first so a corrupt upload fails
//! before any API call. The decoded image is then re-encoded as PNG and
//! base64-wrapped for the vision API; PNG is lossless, and JPEG artefacts
//! around glyphs hurt recognition.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::ImageData;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Decode uploaded image bytes, guessing the format from the content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, image::ImageError> {
    let img = image::load_from_memory(bytes)?;
    debug!("Decoded image {}x{} px", img.width(), img.height());
    Ok(img)
}

/// Encode an image as a base64 PNG ready for the vision API.
///
/// `detail: "high"` lets GPT-4-class models tile the image instead of
/// reading a single downscaled overview, which loses small print.
pub fn encode_image(img: &DynamicImage) -> Result<ImageData, image::ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)?;

    let b64 = STANDARD.encode(&buf);
    debug!("Encoded image → {} bytes base64", b64.len());

    Ok(ImageData::new(b64, "image/png").with_detail("high"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn red_square() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn encode_small_image() {
        let data = encode_image(&red_square()).expect("encode should succeed");
        assert_eq!(data.mime_type, "image/png");
        let decoded = STANDARD.decode(&data.data).expect("valid base64");
        assert!(decoded.starts_with(b"\x89PNG"));
    }

    #[test]
    fn decode_png_bytes() {
        let mut png = Vec::new();
        red_square()
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let img = decode_image(&png).expect("valid png");
        assert_eq!((img.width(), img.height()), (10, 10));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"definitely not an image").is_err());
    }
}
