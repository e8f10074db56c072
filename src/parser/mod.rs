//! 启发式题目解析引擎
//!
//! 纯函数，不持有任何状态。每一步都是独立的正则扫描：
//!
//! ```text
//! 原文 ─┬─ segmenter (题目块) ── options (题干 + 选项, normalizer) ─┐
//!       └─ answers (全文答案表) ────────────────────────────────────┴─ assembler ─→ Vec<QuestionRecord>
//! ```
//!
//! 任何输入都不会报错；找不到题目时返回空列表。

pub mod answers;
pub mod assembler;
pub mod normalizer;
pub mod options;
pub mod segmenter;

pub use answers::{inline_answer, resolve_answer_key};
pub use assembler::{assemble, classify_difficulty, ParsedQuestion};
pub use normalizer::{contains_math, normalize_math};
pub use options::extract_options;
pub use segmenter::segment_questions;

use tracing::debug;

use crate::models::{ExamMetadata, QuestionRecord};

/// 从纯文本中提取题目
pub fn extract_questions(text: &str, metadata: Option<&ExamMetadata>) -> Vec<QuestionRecord> {
    let blocks = segment_questions(text);
    debug!("检测到 {} 个题目块", blocks.len());

    let parsed: Vec<ParsedQuestion> = blocks
        .into_iter()
        .map(|block| {
            let (stem, options) = extract_options(&block.text);
            if tracing::enabled!(tracing::Level::DEBUG) && contains_math(&block.text) {
                debug!("题号 {} 含数学记法，已规范化", block.ordinal);
            }
            ParsedQuestion {
                block,
                stem,
                options,
            }
        })
        .collect();

    let answer_key = resolve_answer_key(text);
    debug!("答案表中有 {} 条记录", answer_key.len());

    assemble(parsed, &answer_key, metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, OptionLabel};

    #[test]
    fn test_canonical_fixture() {
        let records = extract_questions("1. What is 2^3?\nA) 6\nB) 8\nC) 10\nAnswer: B", None);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.ordinal, 1);
        assert!(record.stem.contains("2^{3}"));
        assert_eq!(record.options.len(), 3);
        assert_eq!(record.options[&OptionLabel::A], "6");
        assert_eq!(record.options[&OptionLabel::B], "8");
        assert_eq!(record.options[&OptionLabel::C], "10");
        assert_eq!(record.correct_answer, Some(OptionLabel::B));
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert!(record.explanation.is_empty());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_no_questions() {
        assert!(extract_questions("hello world", None).is_empty());
    }

    #[test]
    fn test_marker_followed_by_marker_yields_no_block() {
        let records = extract_questions("7. 8. real question text that is long enough", None);

        assert!(records.iter().all(|r| r.ordinal != 7));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ordinal, 8);
    }

    #[test]
    fn test_blank_answer_line_leaves_next_question_unanswered() {
        let text = "1. What is the unit of force?\nA) Newton\nB) Joule\nAnswer:\n\
                    2. A car travels 60 km in one hour. What is its speed?\nA) 60 km/h\nB) 30 km/h";
        let records = extract_questions(text, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].correct_answer, None);
        assert_eq!(records[1].ordinal, 2);
        assert_eq!(records[1].correct_answer, None);
    }

    #[test]
    fn test_answer_key_after_other_block() {
        let text = "3. Which gas do plants absorb?\nA) Oxygen\nB) Nitrogen\nC) Carbon dioxide\n\
                    5. Which organ pumps blood?\nA) Liver\nB) Heart\nAnswer 3: C";
        let records = extract_questions(text, None);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ordinal, 3);
        assert_eq!(records[0].correct_answer, Some(OptionLabel::C));
        assert_eq!(records[1].ordinal, 5);
        assert_eq!(records[1].correct_answer, None);
        assert_eq!(records[1].options.len(), 2);
    }
}
