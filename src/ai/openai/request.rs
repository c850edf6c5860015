//! Request construction: target URL, headers and chat-completion body.

use super::types::{ChatCompletionRequest, ChatMessage, ChatMessageContent, MessagePart};
use crate::models::{Config, VisionMode};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

/// Join the base address and endpoint path with exactly one slash.
pub fn build_url(api_base: &str, endpoint_path: &str) -> String {
    let base = api_base.trim_end_matches('/');
    if endpoint_path.starts_with('/') {
        format!("{}{}", base, endpoint_path)
    } else {
        format!("{}/{}", base, endpoint_path)
    }
}

/// Default headers plus bearer auth, with caller-supplied extras merged last.
pub fn build_headers(api_key: &str, extra_headers_json: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if !api_key.is_empty() {
        match HeaderValue::from_str(&format!("Bearer {}", api_key)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => tracing::warn!("API key is not a valid header value, skipping: {}", e),
        }
    }

    merge_extra_headers(&mut headers, extra_headers_json);
    headers
}

// Malformed input is ignored entry by entry; it never fails the request.
fn merge_extra_headers(headers: &mut HeaderMap, extra_headers_json: &str) {
    if extra_headers_json.trim().is_empty() {
        return;
    }

    let parsed: serde_json::Value = match serde_json::from_str(extra_headers_json) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Ignoring malformed extra headers JSON: {}", e);
            return;
        }
    };

    let Some(entries) = parsed.as_object() else {
        tracing::debug!("Ignoring extra headers: expected a JSON object");
        return;
    };

    for (name, value) in entries {
        let Some(value) = value.as_str() else {
            tracing::debug!("Ignoring extra header '{}': value is not a string", name);
            continue;
        };
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::debug!("Ignoring invalid extra header '{}'", name),
        }
    }
}

/// Optional system message followed by exactly one user message.
pub fn build_messages(
    question: &str,
    system_prompt: &str,
    data_url: Option<&str>,
    vision: VisionMode,
) -> Vec<ChatMessage> {
    let mut parts = Vec::new();
    if !question.trim().is_empty() {
        parts.push(MessagePart::text(question));
    }
    if vision.allows_image() {
        if let Some(url) = data_url {
            parts.push(MessagePart::image(url));
        }
    }

    let mut messages = Vec::with_capacity(2);
    if !system_prompt.trim().is_empty() {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: ChatMessageContent::Text(system_prompt.to_string()),
        });
    }

    let user_content = if parts.is_empty() {
        ChatMessageContent::Text(question.to_string())
    } else {
        ChatMessageContent::Parts(parts)
    };
    messages.push(ChatMessage {
        role: "user".to_string(),
        content: user_content,
    });

    messages
}

pub fn build_request(
    config: &Config,
    question: &str,
    data_url: Option<&str>,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: config.model.clone(),
        messages: build_messages(
            question,
            &config.system_prompt,
            data_url,
            config.use_vision,
        ),
        temperature: config.temperature,
        top_p: config.top_p,
        max_tokens: config.max_tokens,
        stream: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_build_url_normalizes_slashes() {
        assert_eq!(
            build_url("http://127.0.0.1:10000/", "/v1/chat/completions"),
            "http://127.0.0.1:10000/v1/chat/completions"
        );
        assert_eq!(
            build_url("http://127.0.0.1:10000", "v1/chat/completions"),
            "http://127.0.0.1:10000/v1/chat/completions"
        );
        assert_eq!(
            build_url("http://host//", "chat"),
            "http://host/chat"
        );
    }

    #[test]
    fn test_headers_without_key() {
        let headers = build_headers("", "");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_with_key() {
        let headers = build_headers("sk-123", "");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-123");
    }

    #[test]
    fn test_extra_headers_merged_last() {
        let headers = build_headers(
            "sk-123",
            r#"{"X-My-Header": "abc", "Authorization": "Token other"}"#,
        );
        assert_eq!(headers.get("x-my-header").unwrap(), "abc");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Token other");
    }

    #[test]
    fn test_malformed_extra_headers_are_ignored() {
        let headers = build_headers("", "{not json");
        assert_eq!(headers.len(), 1);

        let headers = build_headers("", r#"["X-A", "b"]"#);
        assert_eq!(headers.len(), 1);

        let headers = build_headers("", r#"{"bad header": "x", "X-Num": 5, "X-Ok": "yes"}"#);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-ok").unwrap(), "yes");
    }

    #[test]
    fn test_messages_text_and_image() {
        let messages = build_messages(
            "What is this?",
            "Be brief.",
            Some("data:image/jpeg;base64,AAAA"),
            VisionMode::Auto,
        );

        let value = serde_json::to_value(&messages).unwrap();
        assert_eq!(
            value,
            json!([
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": [
                    {"type": "text", "text": "What is this?"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}}
                ]}
            ])
        );
    }

    #[test]
    fn test_messages_force_off_drops_image() {
        let messages = build_messages(
            "What is this?",
            "",
            Some("data:image/jpeg;base64,AAAA"),
            VisionMode::ForceOff,
        );

        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].content,
            ChatMessageContent::Parts(vec![MessagePart::text("What is this?")])
        );
    }

    #[test]
    fn test_messages_blank_question_without_image_is_plain_text() {
        let messages = build_messages("   ", "  ", None, VisionMode::ForceOn);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(
            messages[0].content,
            ChatMessageContent::Text("   ".to_string())
        );
    }

    #[test]
    fn test_messages_image_only() {
        let messages = build_messages("", "", Some("data:image/png;base64,AA"), VisionMode::ForceOn);
        assert_eq!(
            messages[0].content,
            ChatMessageContent::Parts(vec![MessagePart::image("data:image/png;base64,AA")])
        );
    }

    #[test]
    fn test_build_request_uses_config() {
        let config = Config {
            model: "qwen-vl".to_string(),
            max_tokens: 64,
            ..Config::default()
        };

        let request = build_request(&config, "hi", None);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "qwen-vl");
        assert_eq!(value["max_tokens"], 64);
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
