use super::{ImageService, PreparedImage};
use crate::models::ImageFormat;
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub struct MockImageProcessor {
    prepare_count: Arc<Mutex<usize>>,
    format: ImageFormat,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageProcessor {
    pub fn new() -> Self {
        Self {
            prepare_count: Arc::new(Mutex::new(0)),
            format: ImageFormat::Jpeg,
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_prepare_count(&self) -> usize {
        *self.prepare_count.lock().unwrap()
    }
}

impl Default for MockImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageProcessor {
    async fn prepare(&self, image_data: &[u8]) -> Result<PreparedImage> {
        let mut count = self.prepare_count.lock().unwrap();
        *count += 1;

        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Image(image::ImageError::IoError(
                std::io::Error::other("Mock failure"),
            )));
        }

        // Pass the input through untouched
        Ok(PreparedImage {
            mime: self.format.mime(),
            bytes: image_data.to_vec(),
            width: 1,
            height: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_image_processor() {
        let processor = MockImageProcessor::new();

        let result = processor.prepare(b"fake image data").await.unwrap();

        assert_eq!(result.mime, "image/jpeg");
        assert_eq!(result.bytes, b"fake image data");
        assert_eq!(processor.get_prepare_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_with_format() {
        let processor = MockImageProcessor::new().with_format(ImageFormat::Png);

        let result = processor.prepare(b"data").await.unwrap();
        assert!(result.data_url().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_mock_with_failure() {
        let processor = MockImageProcessor::new().with_failure(true);

        let result = processor.prepare(b"data").await;
        assert!(result.is_err());
        assert_eq!(processor.get_prepare_count(), 1);
    }
}
