//! Positive/negative prompt splitting.
//!
//! Models are asked to answer with `Prompt: ...` and `Negative: ...` lines
//! but routinely add preambles, translate the labels, or pick synonyms. The
//! splitter tolerates all of that with three label scans:
//!
//! 1. everything up to and including the first positive label at a line
//!    start is discarded,
//! 2. the first negative label anywhere splits the remainder in two,
//! 3. stray labels left at the start of any line in either half are removed,
//!    so splitting a reconstructed `positive\nNegative: negative` pair gives
//!    the same pair back.
//!
//! Alternatives in each pattern are ordered longest first. The regex engine
//! picks the leftmost match and, at equal offsets, the first alternative, so
//! `Negative prompt:` is consumed whole instead of leaving `prompt:` behind.

use regex::Regex;

lazy_static::lazy_static! {
    static ref POSITIVE_MARKER: Regex =
        Regex::new(r"(?i)(?:^|\n)\s*(?:prompt|positive|提示词|正向)\s*[:：]\s*").unwrap();

    static ref NEGATIVE_MARKER: Regex = Regex::new(
        r"(?i)(?:\b(?:negative\s*prompt|negative|neg|avoid|disallow|do\s*not)|负向|负面|避免|不要)\s*[:：]\s*"
    )
    .unwrap();

    static ref LINE_POSITIVE_LABEL: Regex =
        Regex::new(r"(?im)^\s*(?:positive|prompt|提示词|正向)\s*[:：]\s*").unwrap();

    static ref LINE_NEGATIVE_LABEL: Regex = Regex::new(
        r"(?im)^\s*(?:negative\s*prompt|negative|neg|avoid|disallow|do\s*not|负向|负面|避免|不要)\s*[:：]\s*"
    )
    .unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptPair {
    pub positive: String,
    pub negative: String,
}

impl PromptPair {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }
}

pub fn split_positive_negative(text: &str) -> PromptPair {
    let normalized = text.replace("\r\n", "\n");
    let mut working = normalized.trim();
    if working.is_empty() {
        return PromptPair::default();
    }

    if let Some(marker) = POSITIVE_MARKER.find(working) {
        working = working[marker.end()..].trim_start();
    }

    let (positive, negative) = match NEGATIVE_MARKER.find(working) {
        Some(marker) => (
            working[..marker.start()].trim(),
            working[marker.end()..].trim(),
        ),
        None => (working.trim(), ""),
    };

    PromptPair {
        positive: LINE_POSITIVE_LABEL
            .replace_all(positive, "")
            .trim()
            .to_string(),
        negative: LINE_NEGATIVE_LABEL
            .replace_all(negative, "")
            .trim()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_basic_two_lines() {
        assert_eq!(
            split_positive_negative("Prompt: a cat\nNegative: a dog"),
            PromptPair::new("a cat", "a dog")
        );
    }

    #[test]
    fn test_preamble_is_discarded() {
        assert_eq!(
            split_positive_negative("random preamble\nPositive: sunset\nAvoid: blur"),
            PromptPair::new("sunset", "blur")
        );
    }

    #[test]
    fn test_no_labels() {
        assert_eq!(
            split_positive_negative("just a plain sentence"),
            PromptPair::new("just a plain sentence", "")
        );
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(split_positive_negative(""), PromptPair::default());
        assert_eq!(split_positive_negative(" \r\n\t "), PromptPair::default());
    }

    #[test]
    fn test_negative_prompt_label_wins_over_negative() {
        assert_eq!(
            split_positive_negative("Prompt: castle at dusk\nNegative prompt: lowres, watermark"),
            PromptPair::new("castle at dusk", "lowres, watermark")
        );
    }

    #[test]
    fn test_negative_label_mid_line() {
        assert_eq!(
            split_positive_negative("Prompt: red car, studio light. Negative: blur"),
            PromptPair::new("red car, studio light.", "blur")
        );
    }

    #[test]
    fn test_negative_before_any_positive_label() {
        assert_eq!(
            split_positive_negative("a forest path\nDo not: people"),
            PromptPair::new("a forest path", "people")
        );
    }

    #[test]
    fn test_label_requires_colon() {
        assert_eq!(
            split_positive_negative("Prompt: avoid the rain, do not stop"),
            PromptPair::new("avoid the rain, do not stop", "")
        );
    }

    #[test]
    fn test_word_boundary_on_english_labels() {
        assert_eq!(
            split_positive_negative("Prompt: a bright scene, photonegative: no"),
            PromptPair::new("a bright scene, photonegative: no", "")
        );
    }

    #[test]
    fn test_localized_labels() {
        assert_eq!(
            split_positive_negative("好的，下面是结果\n提示词：一只猫\n负面：模糊"),
            PromptPair::new("一只猫", "模糊")
        );
        assert_eq!(
            split_positive_negative("正向: 山水画。避免：文字"),
            PromptPair::new("山水画。", "文字")
        );
    }

    #[test]
    fn test_case_insensitive_and_crlf() {
        assert_eq!(
            split_positive_negative("PROMPT : a boat\r\nNEG: rust"),
            PromptPair::new("a boat", "rust")
        );
    }

    #[test]
    fn test_repeated_labels_are_cleaned() {
        assert_eq!(
            split_positive_negative("Prompt:\nPositive: a tree\nNegative: Negative: fog"),
            PromptPair::new("a tree", "fog")
        );
    }

    #[test]
    fn test_labels_on_later_lines_are_stripped() {
        assert_eq!(
            split_positive_negative("intro\nPrompt: one\nPrompt: two\nNegative: x"),
            PromptPair::new("one\ntwo", "x")
        );
        assert_eq!(
            split_positive_negative("Prompt: a\nNegative: x\nAvoid: y"),
            PromptPair::new("a", "x\ny")
        );
    }

    #[test]
    fn test_positive_label_must_start_a_line() {
        assert_eq!(
            split_positive_negative("Here is the prompt: a lake"),
            PromptPair::new("Here is the prompt: a lake", "")
        );
    }

    #[test]
    fn test_split_is_stable_on_reconstruction() {
        let inputs = [
            "Prompt: a cat\nNegative: a dog",
            "thinking...\nPositive: misty hills, 35mm\nNegative prompt: text, logo",
            "提示词：一只猫\n不要：狗",
            "Prompt: a\nPrompt: b\nNegative: x",
            "intro\nPrompt: one\n  positive: two\nNegative: x\nNeg: y",
        ];

        for input in inputs {
            let first = split_positive_negative(input);
            let rebuilt = format!("{}\nNegative: {}", first.positive, first.negative);
            assert_eq!(split_positive_negative(&rebuilt), first, "input: {input}");
        }
    }
}
