//! 题干与选项拆分

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{OptionLabel, OptionSet};
use crate::parser::normalizer::normalize_math;

/// 少于这个数量的选项标记不算选项
pub const MIN_OPTIONS: usize = 2;

// 行首 + 可选 "(" 或 "[" + A-D/a-d + ")"、"]" 或 "." + 至少一个空白
static RE_OPTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*[(\[]?([A-Da-d])[)\].]\s").expect("valid option marker regex")
});

// 行首的答案行，选项文本和题干都在这里截止
static RE_ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:Correct\s+Answer|Answer|Ans|Key)\b")
        .expect("valid answer line regex")
});

/// 从题目块中拆出题干和选项
///
/// 题干是第一个选项标记之前的文本；每个选项的文本到下一个选项标记、
/// 答案行或块末尾为止。题干和选项分别做数学记法规范化。
/// 检测到的选项少于 [`MIN_OPTIONS`] 个时返回空的选项集合，整个块都算题干。
pub fn extract_options(block_text: &str) -> (String, OptionSet) {
    let answer_starts: Vec<usize> = RE_ANSWER_LINE
        .find_iter(block_text)
        .map(|m| m.start())
        .collect();

    let markers: Vec<(OptionLabel, usize, usize)> = RE_OPTION_MARKER
        .captures_iter(block_text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((OptionLabel::from_char(letter)?, whole.start(), whole.end()))
        })
        .collect();

    let next_answer_after = |pos: usize| {
        answer_starts
            .iter()
            .copied()
            .find(|&start| start >= pos)
            .unwrap_or(block_text.len())
    };

    if markers.len() < MIN_OPTIONS {
        if !markers.is_empty() {
            debug!("只检测到 {} 个选项标记，按无选项处理", markers.len());
        }
        let stem = &block_text[..next_answer_after(0)];
        return (normalize_math(stem.trim()), OptionSet::new());
    }

    let first_option = markers[0].1;
    let stem = &block_text[..first_option.min(next_answer_after(0))];

    let mut options = OptionSet::new();
    for (i, &(label, _, text_start)) in markers.iter().enumerate() {
        let next_marker = markers.get(i + 1).map_or(block_text.len(), |m| m.1);
        let end = next_marker.min(next_answer_after(text_start));
        let option_text = normalize_math(block_text[text_start..end].trim());

        if options.insert(label, option_text).is_some() {
            debug!("选项 {} 重复出现，保留最后一个", label);
        }
    }

    (normalize_math(stem.trim()), options)
}
