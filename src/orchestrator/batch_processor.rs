//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：按策略准备 LLM 服务（生成式策略缺少密钥时立即失败）
//! 2. **单文档处理**：委托 `document_processor`
//! 3. **目录批处理**：每个文档一个 tokio 任务，用 Semaphore 限制并发数量
//! 4. **全局统计**：汇总成功/失败数量
//!
//! 解析引擎本身无状态，任务之间只共享只读的配置和 LLM 客户端。

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::loaders::list_documents;
use crate::models::{DocumentSource, ExamMetadata, ExtractionReport, Strategy};
use crate::orchestrator::document_processor;
use crate::services::LlmService;
use crate::utils::logging::{log_batch_complete, log_documents_loaded, log_startup, print_final_stats};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    strategy: Strategy,
    llm: Option<Arc<LlmService>>,
}

impl App {
    /// 初始化应用
    ///
    /// 生成式策略在这里创建 LLM 服务，没有密钥时直接返回错误。
    pub fn initialize(config: Config, strategy: Strategy) -> AppResult<Self> {
        log_startup(strategy, config.max_concurrent_documents);

        let llm = match strategy {
            Strategy::Heuristic => None,
            Strategy::Generative => Some(Arc::new(LlmService::new(&config)?)),
        };

        Ok(Self {
            config,
            strategy,
            llm,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 处理单个文档
    pub async fn process_one(
        &self,
        source: &DocumentSource,
        metadata: Option<&ExamMetadata>,
    ) -> ExtractionReport {
        document_processor::process_document(source, self.strategy, metadata, self.llm.as_deref(), 1)
            .await
    }

    /// 并发处理目录中的所有文档，结果顺序与文件名排序一致
    pub async fn process_directory(
        &self,
        folder: &Path,
        metadata: Option<&ExamMetadata>,
    ) -> AppResult<Vec<ExtractionReport>> {
        let documents = list_documents(folder).await?;

        if documents.is_empty() {
            warn!("⚠️ 目录中没有找到 .pdf / .txt 文件: {}", folder.display());
            return Ok(Vec::new());
        }

        let total = documents.len();
        log_documents_loaded(total, self.config.max_concurrent_documents);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents));
        let mut handles = Vec::with_capacity(total);

        for (idx, path) in documents.into_iter().enumerate() {
            let doc_index = idx + 1;
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| AppError::Other(format!("并发控制失败: {}", e)))?;

            let strategy = self.strategy;
            let llm = self.llm.clone();
            let metadata = metadata.cloned();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let source = DocumentSource::Path(path);
                document_processor::process_document(
                    &source,
                    strategy,
                    metadata.as_ref(),
                    llm.as_deref(),
                    doc_index,
                )
                .await
            });
            handles.push(handle);
        }

        // 等待所有任务完成
        let mut reports = Vec::with_capacity(total);
        for (idx, joined) in futures::future::join_all(handles).await.into_iter().enumerate() {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", idx + 1, e);
                    let error = AppError::Other(format!("任务执行失败: {}", e));
                    reports.push(ExtractionReport::failure(self.strategy, None, &error));
                }
            }
        }

        let success = reports.iter().filter(|r| r.success).count();
        let questions: usize = reports.iter().map(|r| r.questions_count).sum();
        log_batch_complete(success, total);
        print_final_stats(success, total - success, total, questions);

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;

    #[test]
    fn test_generative_without_key_fails_at_startup() {
        let result = App::initialize(Config::default(), Strategy::Generative);
        assert!(matches!(result, Err(AppError::Llm(LlmError::MissingCredential))));
    }

    #[test]
    fn test_heuristic_needs_no_key() {
        let app = App::initialize(Config::default(), Strategy::Heuristic).unwrap();
        assert_eq!(app.strategy(), Strategy::Heuristic);
    }
}
