use super::extract::extract_text;
use super::sanitize::sanitize;
use super::select::select_source;
use super::split::split_positive_negative;
use crate::ai::openai::ChatCompletionResponse;
use crate::models::{AskOutputs, ContentSource};
use serde_json::Value;
use std::time::Duration;

pub const TAG: &str = "[openai-ask]";
pub const EMPTY_CONTENT: &str = "[openai-ask] Empty content from server.";

/// Turn a raw HTTP exchange into the four outputs. Every path produces a
/// complete [`AskOutputs`].
pub fn build_outputs(
    body: &str,
    status: u16,
    policy: ContentSource,
    elapsed: Duration,
) -> AskOutputs {
    let decoded: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => return parse_error(&e, status, body),
    };

    let raw_json = serde_json::to_string_pretty(&decoded).unwrap_or_else(|_| body.to_string());

    if status >= 400 {
        tracing::warn!("Server returned HTTP {}", status);
        return AskOutputs {
            answer_text: format!("{} HTTP {}: {}", TAG, status, decoded),
            raw_json,
            ..AskOutputs::default()
        };
    }

    if !decoded.is_object() {
        return parse_error(&"expected a JSON object at the top level", status, body);
    }

    let response: ChatCompletionResponse = match serde_json::from_value(decoded) {
        Ok(response) => response,
        Err(e) => return parse_error(&e, status, body),
    };

    let mut outputs = AskOutputs {
        raw_json,
        ..AskOutputs::default()
    };

    if let Some(choice) = response.first_choice() {
        let message = choice.message.as_ref();
        let content = extract_text(message.and_then(|m| m.content.as_ref()));
        let reasoning = extract_text(message.and_then(|m| m.reasoning_content.as_ref()));
        let fallback = extract_text(choice.text.as_ref());

        let source = select_source(policy, &content, &reasoning, &fallback);

        // Split the unsanitized text so no label is lost to cleanup.
        let pair = split_positive_negative(source);
        outputs.positive = pair.positive;
        outputs.negative = pair.negative;
        outputs.answer_text = sanitize(source);
    } else {
        tracing::debug!("Response contained no choices");
    }

    if outputs.answer_text.is_empty() {
        outputs.answer_text = EMPTY_CONTENT.to_string();
    }
    outputs
        .answer_text
        .push_str(&format!("\n\n[latency: {:.2}s]", elapsed.as_secs_f64()));

    outputs
}

/// Outputs for a request that never produced a response.
pub fn transport_error(error: &dyn std::fmt::Display) -> AskOutputs {
    let answer_text = format!("{} request error: {}", TAG, error);
    let raw_json = serde_json::to_string_pretty(&serde_json::json!({ "error": answer_text }))
        .unwrap_or_default();

    AskOutputs {
        answer_text,
        raw_json,
        ..AskOutputs::default()
    }
}

fn parse_error(error: &dyn std::fmt::Display, status: u16, body: &str) -> AskOutputs {
    tracing::warn!("Could not decode response body: {}", error);
    AskOutputs {
        answer_text: format!(
            "{} parse error: {}\nHTTP {} Body: {}",
            TAG, error, status, body
        ),
        raw_json: body.to_string(),
        ..AskOutputs::default()
    }
}
