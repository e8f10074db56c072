//! 组装题目记录

use tracing::debug;

use crate::models::{AnswerKey, Difficulty, ExamMetadata, OptionSet, QuestionBlock, QuestionRecord};
use crate::parser::answers::inline_answer;

/// 题干短于这个长度算简单题
pub const EASY_MAX_STEM_CHARS: usize = 100;
/// 题干超过这个长度算难题
pub const HARD_MIN_STEM_CHARS: usize = 200;
/// 选项超过这个数量算难题
pub const HARD_MIN_OPTIONS: usize = 4;

/// 拆分后的单个题目：原始块 + 题干 + 选项
#[derive(Debug, Clone)]
pub struct ParsedQuestion {
    pub block: QuestionBlock,
    pub stem: String,
    pub options: OptionSet,
}

/// 按固定规则判断难度
///
/// 选项数超过 4 或题干超过 200 字符为 hard，否则题干不足 100 字符为 easy，其余为 medium。
pub fn classify_difficulty(stem: &str, option_count: usize) -> Difficulty {
    let stem_chars = stem.chars().count();

    if option_count > HARD_MIN_OPTIONS || stem_chars > HARD_MIN_STEM_CHARS {
        Difficulty::Hard
    } else if stem_chars < EASY_MAX_STEM_CHARS {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

/// 把拆分结果、答案表和元数据合并成最终记录，顺序与输入一致
///
/// 正确答案优先取全文答案表中的条目，其次取本题块内的答案行，都没有则留空。
pub fn assemble(
    parsed: Vec<ParsedQuestion>,
    answer_key: &AnswerKey,
    metadata: Option<&ExamMetadata>,
) -> Vec<QuestionRecord> {
    let metadata = metadata.cloned().unwrap_or_default();

    parsed
        .into_iter()
        .map(|question| {
            let ordinal = question.block.ordinal;
            let correct_answer = answer_key
                .get(&ordinal)
                .copied()
                .or_else(|| inline_answer(&question.block.text));

            if correct_answer.is_none() {
                debug!("题号 {} 没有找到答案", ordinal);
            }

            let difficulty = classify_difficulty(&question.stem, question.options.len());

            QuestionRecord {
                ordinal,
                stem: question.stem,
                options: question.options,
                correct_answer,
                difficulty,
                explanation: String::new(),
                tags: Vec::new(),
                metadata: metadata.clone(),
            }
        })
        .collect()
}
