//! Data models and configuration
//!
//! Defines the selection and vision policies, image encoding options, the
//! four-part output bundle, and the runtime configuration.

use crate::prompts;
use crate::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which message field is treated as the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    #[default]
    #[value(name = "content_only")]
    ContentOnly,
    #[value(name = "auto")]
    Auto,
    #[value(name = "reasoning_only")]
    ReasoningOnly,
}

/// Whether an attached image is sent along with the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisionMode {
    /// Send the image when one is available.
    #[default]
    #[value(name = "auto")]
    Auto,
    /// Always use the multipart message layout.
    #[value(name = "force_on")]
    ForceOn,
    /// Text only; the image is never prepared.
    #[value(name = "force_off")]
    ForceOff,
}

impl VisionMode {
    pub fn allows_image(self) -> bool {
        matches!(self, VisionMode::Auto | VisionMode::ForceOn)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// The four artifacts produced by every ask, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskOutputs {
    pub positive: String,
    pub negative: String,
    pub answer_text: String,
    pub raw_json: String,
}

/// Image downscaling/encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageOptions {
    /// Longest side after resizing; 0 disables resizing.
    pub max_side: u32,
    pub format: ImageFormat,
    /// Only used for JPEG.
    pub jpeg_quality: u8,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_side: 1280,
            format: ImageFormat::Jpeg,
            jpeg_quality: 90,
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub endpoint_path: String,
    pub model: String,
    pub api_key: String,
    pub extra_headers_json: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub system_prompt: String,
    pub use_vision: VisionMode,
    pub content_source: ContentSource,
    pub image: ImageOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:10000".to_string(),
            endpoint_path: "/v1/chat/completions".to_string(),
            model: "minicpm-v-4.5".to_string(),
            api_key: String::new(),
            extra_headers_json: String::new(),
            timeout: Duration::from_secs(60),
            temperature: 0.3,
            top_p: 1.0,
            max_tokens: 512,
            system_prompt: prompts::SYSTEM.to_string(),
            use_vision: VisionMode::Auto,
            content_source: ContentSource::ContentOnly,
            image: ImageOptions::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_base) = lookup("OPENAI_ASK_API_BASE") {
            config.api_base = api_base;
        }
        if let Some(endpoint_path) = lookup("OPENAI_ASK_ENDPOINT_PATH") {
            config.endpoint_path = endpoint_path;
        }
        if let Some(model) = lookup("OPENAI_ASK_MODEL") {
            config.model = model;
        }
        if let Some(api_key) = lookup("OPENAI_ASK_API_KEY") {
            config.api_key = api_key;
        }
        if let Some(extra) = lookup("OPENAI_ASK_EXTRA_HEADERS") {
            config.extra_headers_json = extra;
        }
        if let Some(raw) = lookup("OPENAI_ASK_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "OPENAI_ASK_TIMEOUT_SECS must be an integer, got '{}'",
                    raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let timeout_secs = self.timeout.as_secs();
        if !(1..=600).contains(&timeout_secs) {
            return Err(Error::Config(format!(
                "timeout must be between 1 and 600 seconds, got {}",
                timeout_secs
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(Error::Config(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                self.top_p
            )));
        }
        if !(1..=8192).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be between 1 and 8192, got {}",
                self.max_tokens
            )));
        }
        if self.image.max_side != 0 && !(256..=4096).contains(&self.image.max_side) {
            return Err(Error::Config(format!(
                "max_side must be 0 or between 256 and 4096, got {}",
                self.image.max_side
            )));
        }
        if !(50..=100).contains(&self.image.jpeg_quality) {
            return Err(Error::Config(format!(
                "jpeg_quality must be between 50 and 100, got {}",
                self.image.jpeg_quality
            )));
        }
        Ok(())
    }
}
