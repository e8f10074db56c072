use anyhow::{Context, Result};
use clap::Parser;
use quiz_extract::models::load_metadata_file;
use quiz_extract::{logger, App, AppError, Config, DocumentSource, ExamMetadata, ExtractionReport, Strategy};
use serde::Serialize;
use std::path::PathBuf;

/// 从 PDF / 文本中提取选择题，结果以 JSON 输出到 stdout
#[derive(Parser, Debug)]
#[command(name = "quiz_extract", version, about)]
struct Cli {
    /// PDF 或文本文件；传入目录时处理其中所有 .pdf / .txt 文件
    document: PathBuf,
    /// 考试类型，例如 IISER
    exam_type: Option<String>,
    /// 科目
    subject: Option<String>,
    /// 知识点
    topic: Option<String>,
    /// 年份
    year: Option<String>,
    /// 使用生成式模型出题，而不是启发式解析
    #[arg(long)]
    ai: bool,
    /// LLM API 密钥（优先于环境变量）
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
    /// DOCUMENT 文件内容是 Base64 编码
    #[arg(long)]
    base64: bool,
    /// TOML 元数据文件，命令行位置参数会覆盖其中的字段
    #[arg(long, value_name = "FILE")]
    metadata: Option<PathBuf>,
    /// 输出 debug 日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env()?.with_api_key(cli.api_key.clone());

    // 初始化日志
    logger::init(cli.verbose || config.verbose_logging);

    let strategy = if cli.ai {
        Strategy::Generative
    } else {
        Strategy::Heuristic
    };
    let source_name = Some(cli.document.display().to_string());

    let metadata = match resolve_metadata(&cli).await {
        Ok(metadata) => metadata,
        Err(e) => exit_with_failure(strategy, source_name, &e),
    };

    let app = match App::initialize(config, strategy) {
        Ok(app) => app,
        Err(e) => exit_with_failure(strategy, source_name, &e),
    };

    if cli.document.is_dir() {
        let reports = match app.process_directory(&cli.document, metadata.as_ref()).await {
            Ok(reports) => reports,
            Err(e) => exit_with_failure(strategy, source_name, &e),
        };
        print_json(&reports)?;
        if reports.iter().any(|r| !r.success) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let source = if cli.base64 {
        let payload = tokio::fs::read_to_string(&cli.document)
            .await
            .map_err(|e| AppError::file_read_failed(cli.document.display().to_string(), e));
        match payload {
            Ok(payload) => DocumentSource::Base64(payload),
            Err(e) => exit_with_failure(strategy, source_name, &e),
        }
    } else {
        DocumentSource::Path(cli.document.clone())
    };

    let report = app.process_one(&source, metadata.as_ref()).await;
    print_json(&report)?;
    if !report.success {
        std::process::exit(1);
    }

    Ok(())
}

/// 合并元数据文件和命令行参数；全部为空时返回 None
async fn resolve_metadata(cli: &Cli) -> Result<Option<ExamMetadata>, AppError> {
    let base = match &cli.metadata {
        Some(path) => load_metadata_file(path).await?,
        None => ExamMetadata::default(),
    };

    let merged = base.merge(ExamMetadata {
        exam_type: cli.exam_type.clone(),
        subject: cli.subject.clone(),
        topic: cli.topic.clone(),
        year: cli.year.clone(),
    });

    Ok((!merged.is_empty()).then_some(merged))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("无法序列化提取结果")?;
    println!("{}", json);
    Ok(())
}

fn exit_with_failure(strategy: Strategy, source: Option<String>, error: &AppError) -> ! {
    tracing::error!("❌ {}", error);
    let report = ExtractionReport::failure(strategy, source, error);
    if let Ok(json) = serde_json::to_string_pretty(&report) {
        println!("{}", json);
    }
    std::process::exit(1);
}
