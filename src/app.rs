//! Application orchestration for a single ask.

use crate::ai::openai::build_request;
use crate::ai::{ChatTransport, OpenAiHttpClient};
use crate::image::{ImageProcessor, ImageService};
use crate::models::{AskOutputs, Config, VisionMode};
use crate::response::{build_outputs, transport_error};
use std::time::Instant;
use tracing::{error, info, warn};

/// Coordinates image preparation, the chat request, and response
/// normalization.
pub struct App {
    transport: Box<dyn ChatTransport>,
    image: Box<dyn ImageService>,
    config: Config,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub transport: Box<dyn ChatTransport>,
    pub image: Box<dyn ImageService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, config: Config) -> Self {
        Self {
            transport: services.transport,
            image: services.image,
            config,
        }
    }

    /// Construct an app that talks HTTP to the configured endpoint.
    pub fn new(config: Config) -> Self {
        let transport = OpenAiHttpClient::new(&config);
        info!("Endpoint: {} (model: {})", transport.url(), config.model);

        Self::with_services(
            AppServices {
                transport: Box::new(transport),
                image: Box::new(ImageProcessor::new(config.image)),
            },
            config,
        )
    }

    /// Ask one question. Always returns all four outputs; failures are
    /// reported inside them rather than as an `Err`.
    pub async fn ask(&self, question: &str, image: Option<&[u8]>) -> AskOutputs {
        let data_url = match (self.config.use_vision, image) {
            (VisionMode::ForceOff, _) | (_, None) => None,
            (_, Some(bytes)) => self.prepare_image(bytes).await,
        };

        let request = build_request(&self.config, question, data_url.as_deref());
        info!(
            "Sending question ({} chars, image: {})",
            question.chars().count(),
            data_url.is_some()
        );

        let started = Instant::now();
        let raw = match self.transport.send(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Request failed: {}", e);
                return transport_error(&e);
            }
        };
        let elapsed = started.elapsed();
        info!("HTTP {} after {:.2}s", raw.status, elapsed.as_secs_f64());

        build_outputs(&raw.body, raw.status, self.config.content_source, elapsed)
    }

    // An image that cannot be prepared is dropped; the question still goes out.
    async fn prepare_image(&self, bytes: &[u8]) -> Option<String> {
        match self.image.prepare(bytes).await {
            Ok(prepared) => {
                info!(
                    "Prepared {}x{} {} image ({} bytes)",
                    prepared.width,
                    prepared.height,
                    prepared.mime,
                    prepared.bytes.len()
                );
                Some(prepared.data_url())
            }
            Err(e) => {
                warn!("Failed to prepare image, sending without it: {}", e);
                None
            }
        }
    }
}
