use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;
use crate::models::question::QuestionRecord;

/// 题目提取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// 基于正则的启发式解析
    Heuristic,
    /// 交给生成式模型出题
    Generative,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Heuristic => f.write_str("heuristic"),
            Strategy::Generative => f.write_str("generative"),
        }
    }
}

/// 单个文档的提取结果，命令行直接输出为 JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub success: bool,
    pub message: String,
    pub questions_count: usize,
    pub questions: Vec<QuestionRecord>,
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// LLM 返回内容无法解析时附带原始回复
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ExtractionReport {
    pub fn success(strategy: Strategy, source: Option<String>, questions: Vec<QuestionRecord>) -> Self {
        Self {
            success: true,
            message: format!("Successfully extracted {} questions", questions.len()),
            questions_count: questions.len(),
            questions,
            strategy,
            source,
            raw_response: None,
        }
    }

    pub fn failure(strategy: Strategy, source: Option<String>, error: &AppError) -> Self {
        Self {
            success: false,
            message: format!("Error processing document: {}", error),
            questions_count: 0,
            questions: Vec::new(),
            strategy,
            source,
            raw_response: error.raw_response().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;

    #[test]
    fn test_failure_carries_raw_response() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = AppError::malformed_response("not json", source);
        let report = ExtractionReport::failure(Strategy::Generative, None, &error);

        assert!(!report.success);
        assert_eq!(report.raw_response.as_deref(), Some("not json"));
        assert_eq!(report.questions_count, 0);
    }

    #[test]
    fn test_failure_without_raw_response() {
        let error = AppError::Llm(LlmError::MissingCredential);
        let report = ExtractionReport::failure(Strategy::Generative, Some("a.pdf".to_string()), &error);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["strategy"], "generative");
        assert!(value.get("rawResponse").is_none());
    }

    #[test]
    fn test_success_message_counts_questions() {
        let report = ExtractionReport::success(Strategy::Heuristic, None, Vec::new());
        assert!(report.success);
        assert_eq!(report.message, "Successfully extracted 0 questions");
    }
}
