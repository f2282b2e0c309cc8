//! Reply text post-processing.
//!
//! Replies come back with bracketed citation markers (`【...】`) from the
//! assistant's retrieval step and occasionally with stray time markers;
//! both are stripped before display. The text is then trimmed and completed
//! with a trailing period when it does not already end a sentence.

use std::sync::LazyLock;

use regex::Regex;

static CITATIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("【[^】]+】").expect("citation pattern"));

static TIME_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"오후 \d{2}:\d{2}").expect("time marker pattern"));

/// Phrases an overlong reply is cut off with; seeing one at the end of a
/// normalized reply means the assistant wants to be prompted to continue.
pub(crate) const CONTINUATION_PHRASES: [&str; 2] =
    ["잠시만 기다려주세요.", "곧 이어서 답변드리겠습니다."];

/// Clean up raw reply text for display.
pub fn normalize_reply(raw: &str) -> String {
    let text = CITATIONS.replace_all(raw, "");
    let text = TIME_MARKERS.replace_all(&text, "");
    let mut text = text.trim().to_string();
    if !text.ends_with(['.', '?', '!']) {
        text.push('.');
    }
    text
}

/// Whether a normalized reply ends in one of the known cut-off phrases.
pub fn needs_continuation(text: &str) -> bool {
    CONTINUATION_PHRASES
        .iter()
        .any(|phrase| text.ends_with(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_citation_markers() {
        assert_eq!(normalize_reply("Answer【source1】."), "Answer.");
        assert_eq!(
            normalize_reply("첫째【4:0†a.pdf】 둘째【4:1†b.pdf】 끝."),
            "첫째 둘째 끝."
        );
    }

    #[test]
    fn strips_time_markers() {
        assert_eq!(normalize_reply("상담 가능합니다 오후 02:30"), "상담 가능합니다.");
    }

    #[test]
    fn completes_trailing_punctuation() {
        assert_eq!(normalize_reply("안녕하세요"), "안녕하세요.");
        assert_eq!(normalize_reply("정말요?"), "정말요?");
        assert_eq!(normalize_reply("반가워요!"), "반가워요!");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize_reply("  hello  "), "hello.");
    }

    #[test]
    fn detects_continuation_phrases() {
        assert!(needs_continuation(&normalize_reply("잠시만 기다려주세요")));
        assert!(needs_continuation("확인 중입니다. 곧 이어서 답변드리겠습니다."));
        assert!(!needs_continuation("답변이 완료되었습니다."));
    }

    #[test]
    fn empty_reply_still_gets_a_period() {
        assert_eq!(normalize_reply(""), ".");
    }
}
