//! 答案识别
//!
//! 两种写法：
//! - 带题号的答案表（`Answer 3: C`、`Key 12 - b`），在全文范围内扫描；
//! - 题目块内以答案开头的行（`Answer: B`），不带题号，只在本题块内查找。

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{AnswerKey, OptionLabel};

// 一条答案记录不跨行
static RE_ANSWER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Correct[ \t]+Answer|Answer|Ans|Key)[ \t]*[:.\-]?[ \t]*(\d+)[ \t]*[:.)\-][ \t]*\(?([A-D])\b")
        .expect("valid answer key regex")
});

static RE_INLINE_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:Correct[ \t]+Answer|Answer|Ans)[ \t]*[:.\-]?[ \t]*\(?([A-D])\b")
        .expect("valid inline answer regex")
});

/// 全文扫描带题号的答案
///
/// 同一题号出现多次时以最后一次为准。
pub fn resolve_answer_key(text: &str) -> AnswerKey {
    let mut key = AnswerKey::new();

    for caps in RE_ANSWER_KEY.captures_iter(text) {
        let ordinal = match caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
            Some(n) => n,
            None => continue,
        };
        let label = match caps
            .get(2)
            .and_then(|m| m.as_str().chars().next())
            .and_then(OptionLabel::from_char)
        {
            Some(label) => label,
            None => continue,
        };

        if let Some(previous) = key.insert(ordinal, label) {
            debug!("题号 {} 的答案 {} 被后出现的 {} 覆盖", ordinal, previous, label);
        }
    }

    key
}

/// 在单个题目块内查找不带题号的答案
pub fn inline_answer(block_text: &str) -> Option<OptionLabel> {
    RE_INLINE_ANSWER
        .captures(block_text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(OptionLabel::from_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key() {
        assert!(resolve_answer_key("no answers in here").is_empty());
        assert!(resolve_answer_key("").is_empty());
    }

    #[test]
    fn test_key_variants() {
        let text = "Answer 1: a\nAns 2 - B\nCorrect Answer: 3. c\nKEY 4) D\nanswer-5:(b)";
        let key = resolve_answer_key(text);

        assert_eq!(key.get(&1), Some(&OptionLabel::A));
        assert_eq!(key.get(&2), Some(&OptionLabel::B));
        assert_eq!(key.get(&3), Some(&OptionLabel::C));
        assert_eq!(key.get(&4), Some(&OptionLabel::D));
        assert_eq!(key.get(&5), Some(&OptionLabel::B));
    }

    #[test]
    fn test_last_match_wins() {
        let key = resolve_answer_key("Answer 7: A\nsome text\nAnswer 7: D");
        assert_eq!(key.len(), 1);
        assert_eq!(key.get(&7), Some(&OptionLabel::D));
    }

    #[test]
    fn test_key_ignores_block_boundaries() {
        let text = "5. Fifth question is here\nA) x\nB) y\nAnswer 3: C";
        assert_eq!(resolve_answer_key(text).get(&3), Some(&OptionLabel::C));
    }

    #[test]
    fn test_blank_answer_line_does_not_capture_next_question() {
        let text = "1. What is the unit of force?\nA) Newton\nB) Joule\nAnswer:\n2. A car travels 60 km in one hour";
        assert!(resolve_answer_key(text).is_empty());
    }

    #[test]
    fn test_key_requires_ordinal() {
        assert!(resolve_answer_key("Answer: B").is_empty());
    }

    #[test]
    fn test_key_rejects_labels_outside_alphabet() {
        assert!(resolve_answer_key("Answer 2: E").is_empty());
    }

    #[test]
    fn test_inline_answer() {
        assert_eq!(inline_answer("What is 2^3?\nA) 6\nB) 8\nAnswer: B"), Some(OptionLabel::B));
        assert_eq!(inline_answer("Ans (c)"), Some(OptionLabel::C));
        assert_eq!(inline_answer("Correct Answer - d"), Some(OptionLabel::D));
        assert_eq!(inline_answer("Answer: Both are wrong"), None);
        assert_eq!(inline_answer("Answer 3: C"), None);
        assert_eq!(inline_answer("no answer given"), None);
        assert_eq!(inline_answer("Choose the answer a student would give"), None);
        assert_eq!(inline_answer("Answer:\n(A) first option"), None);
    }
}
