use crate::error::{AppError, AppResult, DocumentError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// 文档来源
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// 本地文件路径（PDF 或纯文本）
    Path(PathBuf),
    /// 内存中的原始字节
    Bytes(Vec<u8>),
    /// Base64 编码的内容，允许带 `data:...;base64,` 前缀
    Base64(String),
}

impl DocumentSource {
    /// 用于日志和报告的简短描述
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Path(path) => path.display().to_string(),
            DocumentSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            DocumentSource::Base64(payload) => format!("<base64, {} chars>", payload.len()),
        }
    }
}

/// 把文档解码为纯文本
///
/// PDF（以 `%PDF` 开头或扩展名为 `.pdf`）交给 `pdf-extract`，其余内容按 UTF-8 文本读取。
pub async fn load_document(source: &DocumentSource) -> AppResult<String> {
    match source {
        DocumentSource::Path(path) => {
            let bytes = read_file(path).await?;
            let is_pdf = has_pdf_extension(path) || is_pdf_bytes(&bytes);
            decode_bytes(&bytes, is_pdf)
        }
        DocumentSource::Bytes(bytes) => decode_bytes(bytes, is_pdf_bytes(bytes)),
        DocumentSource::Base64(payload) => {
            let bytes = decode_base64(payload)?;
            decode_bytes(&bytes, is_pdf_bytes(&bytes))
        }
    }
}

/// 列出目录中所有 `.pdf` / `.txt` 文件（按文件名排序）
pub async fn list_documents(folder_path: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder_path.is_dir() {
        return Err(AppError::Document(DocumentError::DirectoryNotFound {
            path: folder_path.display().to_string(),
        }));
    }

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(folder_path)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path.display().to_string(), e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());
        if matches!(extension.as_deref(), Some("pdf") | Some("txt")) {
            documents.push(path);
        }
    }

    documents.sort();
    info!("在 {} 中找到 {} 个文档", folder_path.display(), documents.len());

    Ok(documents)
}

/// 去掉 data URL 前缀和空白后做 Base64 解码
pub fn decode_base64(payload: &str) -> AppResult<Vec<u8>> {
    let payload = payload.trim();
    let payload = match payload.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => payload,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    Ok(STANDARD.decode(cleaned.as_bytes())?)
}

async fn read_file(path: &Path) -> AppResult<Vec<u8>> {
    if !path.exists() {
        return Err(AppError::Document(DocumentError::NotFound {
            path: path.display().to_string(),
        }));
    }

    fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))
}

fn decode_bytes(bytes: &[u8], is_pdf: bool) -> AppResult<String> {
    if is_pdf {
        debug!("按 PDF 解析 {} 字节", bytes.len());
        pdf_extract::extract_text_from_mem(bytes).map_err(AppError::pdf_extract_failed)
    } else {
        debug!("按 UTF-8 文本读取 {} 字节", bytes.len());
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn is_pdf_bytes(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}
