use crate::ai::openai::ContentValue;
use serde_json::Value;

/// Flatten a message content value into plain text. Never fails; unusable
/// shapes yield an empty string.
pub fn extract_text(value: Option<&ContentValue>) -> String {
    match value {
        None => String::new(),
        Some(ContentValue::Text(text)) => text.clone(),
        Some(ContentValue::Blocks(blocks)) => blocks
            .iter()
            .filter_map(block_text)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        Some(ContentValue::Other(other)) => other.to_string(),
    }
}

// `{"type": "text", "text": ".."}` and `{"type": "output_text", "content": ".."}`
// both occur in the wild.
fn block_text(block: &Value) -> Option<&str> {
    let object = block.as_object()?;
    let text = ["text", "content"]
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())?;

    (!text.trim().is_empty()).then_some(text)
}
