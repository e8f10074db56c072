//! 编排层（Orchestration Layer）
//!
//! ```text
//! batch_processor (App: 单个文档 / 整个目录)
//!     ↓
//! document_processor (解码 → 按策略提取 → ExtractionReport)
//!     ↓
//! parser（启发式）/ services::LlmService（生成式）
//! ```
//!
//! 两种策略互相独立，由调用方选择，失败时不会自动切换。

pub mod batch_processor;
pub mod document_processor;

pub use batch_processor::App;
pub use document_processor::{extract_from_text, process_document};
