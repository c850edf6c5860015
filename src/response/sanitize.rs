use regex::Regex;

lazy_static::lazy_static! {
    // Leading speaker tag echoed back by some chat templates.
    static ref SPEAKER_PREFIX: Regex =
        Regex::new(r"(?i)^\s*(?:用户|user\b)\s*[:：]?\s*\n?").unwrap();
}

/// Light cleanup of the full answer: drop a leading `User:`/`用户：` tag once
/// and trim. Labels such as `Prompt:` are left in place.
pub fn sanitize(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    SPEAKER_PREFIX
        .replace(&normalized, "")
        .trim()
        .to_string()
}
