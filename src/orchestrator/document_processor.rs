//! 单个文档处理器 - 编排层
//!
//! 解码文档 → 按策略提取题目 → 包装成 [`ExtractionReport`]。
//! 失败不会向上抛出，而是写进报告（`success: false`）。

use crate::error::{AppError, AppResult, LlmError};
use crate::models::{
    load_document, DocumentSource, ExamMetadata, ExtractionReport, QuestionRecord, Strategy,
};
use crate::parser;
use crate::services::LlmService;
use crate::utils::logging::truncate_text;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// 处理单个文档
///
/// # 参数
/// - `source`: 文档来源
/// - `strategy`: 提取策略
/// - `metadata`: 调用方提供的元数据（可选）
/// - `llm`: 生成式策略使用的 LLM 服务
/// - `doc_index`: 文档索引（仅用于日志）
pub async fn process_document(
    source: &DocumentSource,
    strategy: Strategy,
    metadata: Option<&ExamMetadata>,
    llm: Option<&LlmService>,
    doc_index: usize,
) -> ExtractionReport {
    let started = Instant::now();
    let description = source.describe();
    info!("[文档 {}] 开始处理: {} (策略: {})", doc_index, description, strategy);

    let result = match load_document(source).await {
        Ok(text) => {
            info!("[文档 {}] ✓ 文本解码完成，共 {} 字符", doc_index, text.chars().count());
            debug!("[文档 {}] 文本预览: {}", doc_index, truncate_text(&text, 80));
            extract_from_text(&text, strategy, metadata, llm).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(questions) => {
            if questions.is_empty() {
                warn!("[文档 {}] ⚠️ 没有识别到题目", doc_index);
            }
            log_questions(doc_index, &questions);
            info!(
                "[文档 {}] ✅ 提取完成: {} 道题目，用时 {:?}",
                doc_index,
                questions.len(),
                started.elapsed()
            );
            ExtractionReport::success(strategy, Some(description), questions)
        }
        Err(e) => {
            error!("[文档 {}] ❌ 处理失败: {}", doc_index, e);
            ExtractionReport::failure(strategy, Some(description), &e)
        }
    }
}

/// 对已解码的文本按策略提取题目
///
/// 生成式策略要求传入 `llm`；启发式策略永远不会失败。
pub async fn extract_from_text(
    text: &str,
    strategy: Strategy,
    metadata: Option<&ExamMetadata>,
    llm: Option<&LlmService>,
) -> AppResult<Vec<QuestionRecord>> {
    match strategy {
        Strategy::Heuristic => Ok(parser::extract_questions(text, metadata)),
        Strategy::Generative => match llm {
            Some(service) => service.generate_questions(text, metadata).await,
            None => Err(AppError::Llm(LlmError::MissingCredential)),
        },
    }
}

fn log_questions(doc_index: usize, questions: &[QuestionRecord]) {
    for question in questions {
        debug!("[文档 {}]   {}", doc_index, question);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_heuristic_report_from_bytes() {
        let source = DocumentSource::Bytes(
            b"1. What is 2^3?\nA) 6\nB) 8\nC) 10\nAnswer: B\n2. Name the largest planet.\nA) Mars\nB) Jupiter\nAnswer: B"
                .to_vec(),
        );
        let report = process_document(&source, Strategy::Heuristic, None, None, 1).await;

        assert!(report.success);
        assert_eq!(report.questions_count, 2);
        assert_eq!(report.source.as_deref(), Some("<98 bytes>"));
    }

    #[tokio::test]
    async fn test_decode_failure_becomes_failed_report() {
        let source = DocumentSource::Base64("%%%".to_string());
        let report = process_document(&source, Strategy::Heuristic, None, None, 1).await;

        assert!(!report.success);
        assert!(report.questions.is_empty());
        assert!(report.raw_response.is_none());
    }

    #[tokio::test]
    async fn test_generative_without_service_does_not_fall_back() {
        let result = extract_from_text("1. A valid heuristic question", Strategy::Generative, None, None).await;
        assert!(result.is_err());
    }
}
