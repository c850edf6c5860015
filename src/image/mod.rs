//! Image preparation for vision requests
//!
//! Downscales an input image and re-encodes it as JPEG or PNG so it can be
//! embedded in a chat message as a `data:` URL.

pub mod mock;
pub mod processor;

pub use mock::MockImageProcessor;
pub use processor::ImageProcessor;

use crate::Result;
use async_trait::async_trait;
use base64::Engine as _;

/// An encoded image ready to embed in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl PreparedImage {
    pub fn data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime, payload)
    }
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn prepare(&self, image_data: &[u8]) -> Result<PreparedImage>;
}
