/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::models::Strategy;
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `strategy`: 提取策略
/// - `max_concurrent`: 目录批处理的最大并发数
pub fn log_startup(strategy: Strategy, max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目提取 (策略: {})", strategy);
    info!("📊 目录批处理最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
///
/// # 参数
/// - `total`: 文档总数
/// - `max_concurrent`: 最大并发数
pub fn log_documents_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
    info!("📋 最多同时处理 {} 个\n", max_concurrent);
}

/// 记录批处理完成信息
pub fn log_batch_complete(success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 批处理完成: 成功 {}/{}", success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `questions`: 提取到的题目总数
pub fn print_final_stats(success: usize, failed: usize, total: usize, questions: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("📝 题目总数: {}", questions);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本，换行替换为空格
pub fn truncate_text(text: &str, max_len: usize) -> String {
    let single_line = text.replace(['\r', '\n'], " ");
    if single_line.chars().count() > max_len {
        single_line.chars().take(max_len).collect::<String>() + "..."
    } else {
        single_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("line one\nline two", 100), "line one line two");
        assert_eq!(truncate_text("题目题目题目", 2), "题目...");
    }
}
