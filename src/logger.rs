//! 日志初始化
//!
//! 日志统一写到 stderr，stdout 只输出 JSON 结果。

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 优先使用 `RUST_LOG`，否则 `verbose` 为 true 时输出 debug 级别，默认 info。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
