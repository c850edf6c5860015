//! Chat-completion transport
//!
//! Provides the request/response types for OpenAI-compatible endpoints and
//! the transport seam the app sends requests through.

pub mod mock;
pub mod openai;

pub use mock::MockChatTransport;
pub use openai::OpenAiHttpClient;

use crate::ai::openai::ChatCompletionRequest;
use crate::Result;
use async_trait::async_trait;

/// Status code and undecoded body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one request. Any HTTP status counts as success; `Err` means no
    /// response was received.
    async fn send(&self, request: &ChatCompletionRequest) -> Result<RawResponse>;
}
