//! # Quiz Extract
//!
//! 从 PDF 提取出的纯文本中识别选择题（题号、选项、答案），输出结构化的题目记录。
//!
//! ## 架构设计
//!
//! ### ① 解析引擎（Parser）
//! - `parser/` - 纯函数，无状态，对任何输入都不报错
//! - `normalizer` - 数学符号规范化（LaTeX 风格）
//! - `segmenter` - 按题号切分题目块
//! - `options` - 拆分题干与 A-D 选项
//! - `answers` - 全文答案表 + 题内答案行
//! - `assembler` - 合并答案、元数据，判断难度
//!
//! ### ② 数据与加载（Models）
//! - `models/` - 题目记录、元数据、提取报告
//! - `models/loaders` - PDF / 文本 / Base64 解码，TOML 元数据
//!
//! ### ③ 外部能力（Services）
//! - `LlmService` - 生成式模型出题（可选的另一种策略）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/document_processor` - 单个文档：解码 → 提取 → 报告
//! - `orchestrator/batch_processor` - 目录批处理，控制并发
//!
//! ## 示例
//!
//! ```
//! use quiz_extract::{extract_questions, OptionLabel};
//!
//! let records = extract_questions("1. What is 2^3?\nA) 6\nB) 8\nC) 10\nAnswer: B", None);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].correct_answer, Some(OptionLabel::B));
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    DocumentSource, ExamMetadata, ExtractionReport, OptionLabel, QuestionRecord, Strategy,
};
pub use orchestrator::App;
pub use parser::extract_questions;
pub use services::LlmService;
