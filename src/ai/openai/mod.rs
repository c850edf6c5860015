pub mod client;
pub mod request;
pub mod types;

pub use client::OpenAiHttpClient;
pub use request::{build_headers, build_messages, build_request, build_url};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ContentValue};
