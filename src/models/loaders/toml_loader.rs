use crate::error::{AppError, AppResult, DocumentError};
use crate::models::metadata::ExamMetadata;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载考试元数据
///
/// ```toml
/// examType = "IISER"
/// subject = "Physics"
/// topic = "Kinematics"
/// year = 2021
/// ```
pub async fn load_metadata_file(toml_file_path: &Path) -> AppResult<ExamMetadata> {
    if !toml_file_path.exists() {
        return Err(AppError::Document(DocumentError::NotFound {
            path: toml_file_path.display().to_string(),
        }));
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let metadata: ExamMetadata = toml::from_str(&content).map_err(|e| {
        AppError::metadata_parse_failed(toml_file_path.display().to_string(), e)
    })?;

    tracing::debug!("已加载元数据: {:?}", metadata);

    Ok(metadata)
}
