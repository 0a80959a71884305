//! Image validation and fetching utilities.
//!
//! Shared by the upload handler (validating user uploads) and the generation
//! pipeline (validating a re-fetched dish image before storing it).

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::http::HttpClient;

/// Allowed image formats for uploaded and generated photos.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Maximum file size for images (10MB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Result of successfully fetching and validating an image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// The raw image bytes.
    pub data: Vec<u8>,
    /// The detected content type (e.g., "image/png").
    pub content_type: String,
}

/// Validate image data: check format is allowed and detect content type.
///
/// Detection uses magic bytes, not any client-supplied content type.
pub fn validate_image(data: &[u8]) -> Result<String, String> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| format!("Failed to read image: {}", e))?;

    let format = reader
        .format()
        .ok_or_else(|| "Could not detect image format".to_string())?;

    if !ALLOWED_FORMATS.contains(&format) {
        return Err(format!(
            "Unsupported image format: {:?}. Allowed: JPEG, PNG, GIF, WebP",
            format
        ));
    }

    Ok(format.to_mime_type().to_string())
}

/// Fetch an image from a URL and validate size and format.
pub async fn fetch_and_validate_image<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<FetchedImage, String> {
    let data = client
        .fetch_bytes(url)
        .await
        .map_err(|e| format!("Failed to fetch image: {}", e))?;

    if data.len() > MAX_FILE_SIZE {
        return Err(format!(
            "Image too large: {} bytes (max {})",
            data.len(),
            MAX_FILE_SIZE
        ));
    }

    let content_type = validate_image(&data)?;

    Ok(FetchedImage { data, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockClient;

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::new(1, 1);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_validate_png() {
        let content_type = validate_image(&tiny_png()).unwrap();
        assert_eq!(content_type, "image/png");
    }

    #[test]
    fn test_validate_invalid_format() {
        let result = validate_image(b"not an image");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_and_validate() {
        let client = MockClient::new().with_bytes("https://x/dish.png", tiny_png());
        let fetched = fetch_and_validate_image(&client, "https://x/dish.png")
            .await
            .unwrap();
        assert_eq!(fetched.content_type, "image/png");
        assert!(!fetched.data.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_garbage_rejected() {
        let client = MockClient::new().with_bytes("https://x/dish.png", b"garbage".to_vec());
        let result = fetch_and_validate_image(&client, "https://x/dish.png").await;
        assert!(result.is_err());
    }
}
