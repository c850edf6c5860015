use super::{ImageService, PreparedImage};
use crate::models::{ImageFormat, ImageOptions};
use crate::{Error, Result};
use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;

pub struct ImageProcessor {
    options: ImageOptions,
}

impl ImageProcessor {
    pub fn new(options: ImageOptions) -> Self {
        Self { options }
    }

    /// Scale so the longest side is at most `max_side`, keeping the aspect
    /// ratio. Never upscales; `max_side == 0` disables resizing.
    pub fn target_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
        let longest = width.max(height);
        if max_side == 0 || longest <= max_side {
            return (width, height);
        }

        let scale = max_side as f64 / longest as f64;
        let scaled = |side: u32| ((side as f64 * scale).round() as u32).max(1);
        (scaled(width), scaled(height))
    }

    fn prepare_sync(image: DynamicImage, options: ImageOptions) -> Result<PreparedImage> {
        let (width, height) =
            Self::target_dimensions(image.width(), image.height(), options.max_side);
        let resized = if (width, height) == (image.width(), image.height()) {
            image
        } else {
            image.resize_exact(width, height, FilterType::Lanczos3)
        };

        let mut bytes = Vec::new();
        match options.format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut bytes, options.jpeg_quality);
                DynamicImage::ImageRgb8(resized.to_rgb8()).write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                DynamicImage::ImageRgba8(resized.to_rgba8())
                    .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
            }
        }

        Ok(PreparedImage {
            mime: options.format.mime(),
            bytes,
            width,
            height,
        })
    }
}

#[async_trait]
impl ImageService for ImageProcessor {
    async fn prepare(&self, image_data: &[u8]) -> Result<PreparedImage> {
        let img = image::load_from_memory(image_data)?;
        tracing::debug!(
            "Preparing {}x{} image as {}",
            img.width(),
            img.height(),
            self.options.format.mime()
        );

        let options = self.options;
        tokio::task::spawn_blocking(move || Self::prepare_sync(img, options))
            .await
            .map_err(|e| Error::Invariant(format!("Image processing task join error: {}", e)))?
    }
}
