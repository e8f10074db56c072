use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::models::metadata::ExamMetadata;

/// 选项标签，只允许 A-D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    /// 从单个字母解析标签（大小写不敏感）
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = ();

    /// 接受 "B"、"b"、" B) " 这类写法，要求去掉括号和空白后恰好是一个字母
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | '.'));
        let mut chars = trimmed.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => OptionLabel::from_char(c).ok_or(()),
            _ => Err(()),
        }
    }
}

/// 选项集合：标签 → 选项文本
pub type OptionSet = BTreeMap<OptionLabel, String>;

/// 答案表：题号 → 正确选项
pub type AnswerKey = HashMap<u32, OptionLabel>;

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

/// 分段得到的题目块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    /// 原文中的题号，不保证唯一或连续
    pub ordinal: u32,
    /// 从题号标记之后到下一个标记之前的文本（已去除首尾空白）
    pub text: String,
}

/// 输出的题目记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub ordinal: u32,
    pub stem: String,
    pub options: OptionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<OptionLabel>,
    pub difficulty: Difficulty,
    pub explanation: String,
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub metadata: ExamMetadata,
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stem_preview = if self.stem.chars().count() > 80 {
            self.stem.chars().take(80).collect::<String>() + "..."
        } else {
            self.stem.clone()
        };

        match self.correct_answer {
            Some(answer) => write!(
                f,
                "#{} {} [选项: {}, 答案: {}, 难度: {}]",
                self.ordinal,
                stem_preview,
                self.options.len(),
                answer,
                self.difficulty
            ),
            None => write!(
                f,
                "#{} {} [选项: {}, 答案: 未知, 难度: {}]",
                self.ordinal,
                stem_preview,
                self.options.len(),
                self.difficulty
            ),
        }
    }
}
