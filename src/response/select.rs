use crate::models::ContentSource;

/// Pick the text treated as the answer. The first non-empty candidate in
/// policy order wins.
pub fn select_source<'a>(
    policy: ContentSource,
    content: &'a str,
    reasoning: &'a str,
    fallback: &'a str,
) -> &'a str {
    let order = match policy {
        ContentSource::ContentOnly => [content, fallback, reasoning],
        ContentSource::ReasoningOnly => [reasoning, fallback, content],
        ContentSource::Auto => [content, reasoning, fallback],
    };

    order
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_only_falls_back_before_reasoning() {
        assert_eq!(select_source(ContentSource::ContentOnly, "", "R", "F"), "F");
        assert_eq!(select_source(ContentSource::ContentOnly, "", "R", ""), "R");
        assert_eq!(select_source(ContentSource::ContentOnly, "C", "R", "F"), "C");
    }

    #[test]
    fn test_reasoning_only() {
        assert_eq!(select_source(ContentSource::ReasoningOnly, "C", "R", "F"), "R");
        assert_eq!(select_source(ContentSource::ReasoningOnly, "C", "", "F"), "F");
        assert_eq!(select_source(ContentSource::ReasoningOnly, "C", "", ""), "C");
    }

    #[test]
    fn test_auto_prefers_reasoning_over_fallback() {
        assert_eq!(select_source(ContentSource::Auto, "C", "R", "F"), "C");
        assert_eq!(select_source(ContentSource::Auto, "", "R", "F"), "R");
        assert_eq!(select_source(ContentSource::Auto, "", "", "F"), "F");
    }

    #[test]
    fn test_all_empty() {
        for policy in [
            ContentSource::ContentOnly,
            ContentSource::Auto,
            ContentSource::ReasoningOnly,
        ] {
            assert_eq!(select_source(policy, "", "", ""), "");
        }
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        assert_eq!(select_source(ContentSource::Auto, " ", "R", "F"), " ");
    }
}
