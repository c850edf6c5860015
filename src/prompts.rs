pub const DEFAULT_QUESTION: &str = include_str!("../data/prompts/default_question.txt");
pub const SYSTEM: &str = include_str!("../data/prompts/system.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!DEFAULT_QUESTION.is_empty());
        assert!(!SYSTEM.is_empty());
    }

    #[test]
    fn test_prompts_ask_for_labelled_lines() {
        for prompt in [DEFAULT_QUESTION, SYSTEM] {
            assert!(prompt.contains("Prompt:"));
            assert!(prompt.contains("Negative:"));
        }
    }
}
