//! OpenAI-compatible chat-completion payloads.
//!
//! Request types serialize exactly what the endpoint expects. Response types
//! are deliberately lenient: servers such as llama.cpp or vLLM disagree on
//! where the answer lives and in what shape, so every field is optional.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

/// Message content union used in requests.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChatMessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

/// One content segment in multipart message input.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MessagePart {
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageUrl>,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: "text".to_string(),
            text: Some(text.into()),
            image_url: None,
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self {
            part_type: "image_url".to_string(),
            text: None,
            image_url: Some(ImageUrl { url: url.into() }),
        }
    }
}

/// Image URL wrapper for message payloads.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

/// Chat message object.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: ChatMessageContent,
}

/// Top-level chat completion response.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "optional_objects")]
    pub choices: Option<Vec<ChatChoice>>,
}

impl ChatCompletionResponse {
    pub fn first_choice(&self) -> Option<&ChatChoice> {
        self.choices.as_ref().and_then(|choices| choices.first())
    }
}

/// Single choice item returned by chat completions.
#[derive(Debug, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default, deserialize_with = "optional_object")]
    pub message: Option<ResponseMessage>,
    /// Legacy completions-style text, used as a fallback.
    #[serde(default)]
    pub text: Option<ContentValue>,
}

/// Assistant message as returned by the server.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<ContentValue>,
    #[serde(default)]
    pub reasoning_content: Option<ContentValue>,
}

/// Derived struct impls also accept sequences, binding elements to fields by
/// position. Response objects must be JSON objects.
fn from_object<T, E>(value: Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: de::Error,
{
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(E::custom),
        other => Err(E::custom(format!("expected a JSON object, found {}", other))),
    }
}

fn optional_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Value>::deserialize(deserializer)?
        .map(from_object)
        .transpose()
}

fn optional_objects<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Vec<Value>>::deserialize(deserializer)?
        .map(|items| items.into_iter().map(from_object).collect::<Result<Vec<T>, _>>())
        .transpose()
}

/// Polymorphic message content. `null` is represented by the surrounding
/// `Option`.
///
/// `Other` catches everything, so decoding a present value never fails.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentValue {
    Text(String),
    Blocks(Vec<Value>),
    Other(Value),
}
