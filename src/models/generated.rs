use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

use crate::models::metadata::ExamMetadata;
use crate::models::question::{Difficulty, OptionLabel, OptionSet, QuestionRecord};
use crate::parser::classify_difficulty;

// "A) text"、"(b) text"、"C. text"、"D: text"
static RE_LABELED_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*[(\[]?([A-Da-d])[)\].:]\s*(.*)$").expect("valid labeled option regex")
});

/// LLM 生成的单道题目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl GeneratedQuestion {
    /// 转换成与启发式解析相同的输出记录
    ///
    /// - 题号为在回复中的位置（从 1 开始）
    /// - 选项按 "A) text" 解析，没有标签的按顺序补上空闲标签，超出 D 的丢弃
    /// - 模型给出的难度无效时按题干长度和选项数计算
    /// - 模型给出的 topic 放进 tags
    pub fn into_record(self, ordinal: u32, metadata: Option<&ExamMetadata>) -> QuestionRecord {
        let option_count = self.options.len();
        let options = parse_option_list(&self.options, ordinal);

        let correct_answer = self
            .correct_answer
            .as_deref()
            .and_then(|answer| answer.parse::<OptionLabel>().ok());

        let difficulty = self
            .difficulty
            .as_deref()
            .and_then(|d| d.parse::<Difficulty>().ok())
            .unwrap_or_else(|| classify_difficulty(&self.question, option_count));

        let tags = self
            .topic
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .into_iter()
            .collect();

        QuestionRecord {
            ordinal,
            stem: self.question.trim().to_string(),
            options,
            correct_answer,
            difficulty,
            explanation: self.explanation.trim().to_string(),
            tags,
            metadata: metadata.cloned().unwrap_or_default(),
        }
    }
}

fn parse_option_list(entries: &[String], ordinal: u32) -> OptionSet {
    let mut options = OptionSet::new();
    let mut unlabeled = Vec::new();

    for entry in entries {
        match RE_LABELED_OPTION.captures(entry) {
            Some(caps) => {
                let label = caps
                    .get(1)
                    .and_then(|m| m.as_str().chars().next())
                    .and_then(OptionLabel::from_char);
                let text = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
                match label {
                    Some(label) => {
                        options.insert(label, text);
                    }
                    None => unlabeled.push(entry.trim().to_string()),
                }
            }
            None => unlabeled.push(entry.trim().to_string()),
        }
    }

    for text in unlabeled {
        match OptionLabel::ALL.iter().find(|label| !options.contains_key(label)) {
            Some(&label) => {
                options.insert(label, text);
            }
            None => warn!("第 {} 题的选项超过 4 个，丢弃: {}", ordinal, text),
        }
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(options: &[&str]) -> GeneratedQuestion {
        GeneratedQuestion {
            question: "What is the SI unit of force?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answer: Some("A".to_string()),
            explanation: "Force is measured in newtons.".to_string(),
            difficulty: Some("easy".to_string()),
            topic: Some("Units".to_string()),
        }
    }

    #[test]
    fn test_into_record_labeled_options() {
        let record = generated(&["A) Newton", "B) Joule", "C) Watt", "D) Pascal"]).into_record(1, None);

        assert_eq!(record.ordinal, 1);
        assert_eq!(record.options[&OptionLabel::A], "Newton");
        assert_eq!(record.options[&OptionLabel::D], "Pascal");
        assert_eq!(record.correct_answer, Some(OptionLabel::A));
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.explanation, "Force is measured in newtons.");
        assert_eq!(record.tags, vec!["Units".to_string()]);
    }

    #[test]
    fn test_unlabeled_options_fill_free_labels() {
        let record = generated(&["B) Joule", "Newton", "Watt"]).into_record(2, None);

        assert_eq!(record.options[&OptionLabel::A], "Newton");
        assert_eq!(record.options[&OptionLabel::B], "Joule");
        assert_eq!(record.options[&OptionLabel::C], "Watt");
    }

    #[test]
    fn test_extra_options_dropped_and_hard_fallback() {
        let mut question = generated(&["A) 1", "B) 2", "C) 3", "D) 4", "E) 5"]);
        question.difficulty = Some("easy/medium/hard".to_string());
        let record = question.into_record(3, None);

        assert_eq!(record.options.len(), 4);
        assert_eq!(record.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_metadata_and_invalid_answer() {
        let mut question = generated(&["A) x", "B) y"]);
        question.correct_answer = Some("Newton".to_string());
        let metadata = ExamMetadata {
            subject: Some("Physics".to_string()),
            ..Default::default()
        };

        let record = question.into_record(4, Some(&metadata));
        assert_eq!(record.correct_answer, None);
        assert_eq!(record.metadata.subject.as_deref(), Some("Physics"));
    }
}
