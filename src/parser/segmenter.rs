//! 按题号切分题目块

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::QuestionBlock;

/// 题目块的最小长度（字符数），用来过滤页码、列表序号之类的误匹配
pub const MIN_BLOCK_CHARS: usize = 10;

// 行首（可选缩进）+ 可选 "Q" / "Q." 前缀 + 数字 + "." 或 ")"
static RE_QUESTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:Q\.?[ \t]*)?(\d+)[.)]").expect("valid question marker regex")
});

// 紧跟在上一个标记之后、同一行内的标记，例如 "7. 8. ..." 中的 "8."
static RE_CHAINED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[ \t]+(?:Q\.?[ \t]*)?(\d+)[.)]").expect("valid chained marker regex")
});

/// 题号标记在原文中的位置
#[derive(Debug, Clone, Copy)]
struct Marker {
    ordinal: u32,
    start: usize,
    end: usize,
}

/// 把全文切分成题目块，保持原文顺序
///
/// 每个块从题号标记之后开始，到下一个标记之前（或文末）结束。
/// 去掉首尾空白后不足 [`MIN_BLOCK_CHARS`] 个字符的块直接丢弃。
pub fn segment_questions(text: &str) -> Vec<QuestionBlock> {
    let markers = find_markers(text);
    let mut blocks = Vec::with_capacity(markers.len());

    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
        let body = text[marker.end..end].trim();

        if body.chars().count() < MIN_BLOCK_CHARS {
            debug!("跳过过短的题目块 #{} ({} 字符)", marker.ordinal, body.chars().count());
            continue;
        }

        blocks.push(QuestionBlock {
            ordinal: marker.ordinal,
            text: body.to_string(),
        });
    }

    blocks
}

fn find_markers(text: &str) -> Vec<Marker> {
    let mut markers = Vec::new();

    for caps in RE_QUESTION_MARKER.captures_iter(text) {
        let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(mut marker) = to_marker(text, whole.start(), whole.end(), digits.as_str()) else {
            continue;
        };

        // 同一行内连续出现的标记各自成块
        while let Some(chained) = RE_CHAINED_MARKER.captures(&text[marker.end..]) {
            let (Some(whole), Some(digits)) = (chained.get(0), chained.get(1)) else {
                break;
            };
            let offset = marker.end;
            let Some(next) =
                to_marker(text, offset + whole.start(), offset + whole.end(), digits.as_str())
            else {
                break;
            };
            markers.push(marker);
            marker = next;
        }

        markers.push(marker);
    }

    markers
}

fn to_marker(text: &str, start: usize, end: usize, digits: &str) -> Option<Marker> {
    // "2.5" 这样的小数不是题号
    if text[end..].starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let ordinal = digits.parse::<u32>().ok()?;
    Some(Marker { ordinal, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        assert!(segment_questions("hello world").is_empty());
        assert!(segment_questions("").is_empty());
    }

    #[test]
    fn test_basic_segmentation() {
        let text = "1. What is the capital of France?\nA) Paris\nB) Rome\n2. Which planet is largest?\nA) Jupiter\nB) Mars";
        let blocks = segment_questions(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].ordinal, 1);
        assert!(blocks[0].text.starts_with("What is the capital of France?"));
        assert!(blocks[0].text.ends_with("B) Rome"));
        assert_eq!(blocks[1].ordinal, 2);
        assert!(blocks[1].text.starts_with("Which planet"));
    }

    #[test]
    fn test_q_prefix_variants() {
        let text = "Q1. First question text here\nQ.2) Second question text here\nq 3. Third question text here";
        let ordinals: Vec<u32> = segment_questions(text).iter().map(|b| b.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_block_dropped() {
        let text = "7.\n8. real question text that is long enough";
        let blocks = segment_questions(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].ordinal, 8);
    }

    #[test]
    fn test_consecutive_markers_on_one_line() {
        let blocks = segment_questions("7. 8. real question text that is long enough");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].ordinal, 8);
        assert_eq!(blocks[0].text, "real question text that is long enough");
        assert!(blocks.iter().all(|b| b.ordinal != 7));
    }

    #[test]
    fn test_chained_decimal_is_not_marker() {
        let blocks = segment_questions("4. 2.5 litres of water are poured into a tank");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].ordinal, 4);
        assert!(blocks[0].text.starts_with("2.5 litres"));
    }

    #[test]
    fn test_trailing_marker_without_content_dropped() {
        let text = "1. A perfectly ordinary question?\n2.";
        let blocks = segment_questions(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].ordinal, 1);
    }

    #[test]
    fn test_marker_must_start_line() {
        let text = "1. The value is close to 3. Which is correct here?";
        let blocks = segment_questions(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "The value is close to 3. Which is correct here?");
    }

    #[test]
    fn test_decimal_is_not_marker() {
        let text = "1. A car travels at a constant speed for\n2.5 hours. How far does it go?";
        let blocks = segment_questions(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("2.5 hours"));
    }

    #[test]
    fn test_ordinals_passed_through() {
        let text = "3. Out of order question one\n1. Out of order question two\n3. Duplicate ordinal question";
        let ordinals: Vec<u32> = segment_questions(text).iter().map(|b| b.ordinal).collect();
        assert_eq!(ordinals, vec![3, 1, 3]);
    }

    #[test]
    fn test_indented_marker() {
        let text = "   12) Indented question text goes here";
        let blocks = segment_questions(text);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].ordinal, 12);
    }
}
