use super::{ChatTransport, RawResponse};
use crate::ai::openai::ChatCompletionRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const DEFAULT_BODY: &str = r#"{"choices":[{"message":{"role":"assistant","content":"Prompt: a mock scene\nNegative: blurry"}}]}"#;

/// In-memory transport that replays canned responses and records requests.
/// Clones share the same response queue and request log.
#[derive(Clone)]
pub struct MockChatTransport {
    responses: Arc<Mutex<Vec<RawResponse>>>,
    failure: Option<String>,
    requests: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl MockChatTransport {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, status: u16, body: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(RawResponse {
            status,
            body: body.into(),
        });
        self
    }

    /// Fail every call as if the connection had been refused.
    pub fn with_transport_error(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Requests sent so far, as JSON.
    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockChatTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for MockChatTransport {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<RawResponse> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(serde_json::to_value(request)?);
            requests.len() - 1
        };

        if let Some(message) = &self.failure {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.clone(),
            )));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(RawResponse {
                status: 200,
                body: DEFAULT_BODY.to_string(),
            })
        } else {
            Ok(responses[index % responses.len()].clone())
        }
    }
}
