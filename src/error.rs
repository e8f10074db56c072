use std::fmt;

/// 应用程序错误类型
///
/// 启发式解析引擎本身不会返回错误，这里只覆盖外围协作者：
/// 文档解码、LLM 生成、配置。
#[derive(Debug)]
pub enum AppError {
    /// 文档解码错误
    Document(DocumentError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Document(e) => write!(f, "文档错误: {}", e),
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Document(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 文档解码错误
#[derive(Debug)]
pub enum DocumentError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// PDF 文本提取失败
    PdfExtractFailed {
        message: String,
    },
    /// 文本不是合法的 UTF-8
    InvalidUtf8 {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Base64 解码失败
    Base64DecodeFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 元数据 TOML 解析失败
    MetadataParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    DirectoryNotFound {
        path: String,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::NotFound { path } => write!(f, "文件不存在: {}", path),
            DocumentError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            DocumentError::PdfExtractFailed { message } => {
                write!(f, "PDF 文本提取失败: {}", message)
            }
            DocumentError::InvalidUtf8 { source } => {
                write!(f, "文本不是合法的 UTF-8: {}", source)
            }
            DocumentError::Base64DecodeFailed { source } => {
                write!(f, "Base64 解码失败: {}", source)
            }
            DocumentError::MetadataParseFailed { path, source } => {
                write!(f, "元数据解析失败 ({}): {}", path, source)
            }
            DocumentError::DirectoryNotFound { path } => write!(f, "目录不存在: {}", path),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::ReadFailed { source, .. }
            | DocumentError::InvalidUtf8 { source }
            | DocumentError::Base64DecodeFailed { source }
            | DocumentError::MetadataParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// 没有可用的 API 密钥
    MissingCredential,
    /// 构建请求失败
    RequestBuildFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
    /// 返回内容无法解析为题目 JSON
    MalformedResponse {
        raw: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::MissingCredential => {
                write!(
                    f,
                    "未提供 API 密钥 (LLM_API_KEY / GEMINI_API_KEY / GOOGLE_AI_KEY)"
                )
            }
            LlmError::RequestBuildFailed { source } => {
                write!(f, "构建 LLM 请求失败: {}", source)
            }
            LlmError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
            LlmError::MalformedResponse { source, .. } => {
                write!(f, "无法解析 LLM 返回的题目 JSON: {}", source)
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::RequestBuildFailed { source }
            | LlmError::ApiCallFailed { source, .. }
            | LlmError::MalformedResponse { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Document(DocumentError::MetadataParseFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Document(DocumentError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::Document(DocumentError::Base64DecodeFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::Document(DocumentError::InvalidUtf8 {
            source: Box::new(err),
        })
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(LlmError::RequestBuildFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建PDF提取错误
    pub fn pdf_extract_failed(error: impl std::fmt::Display) -> Self {
        AppError::Document(DocumentError::PdfExtractFailed {
            message: error.to_string(),
        })
    }

    /// 创建元数据解析错误
    pub fn metadata_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::MetadataParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM返回内容无法解析的错误，保留原始回复用于诊断
    pub fn malformed_response(
        raw: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::MalformedResponse {
            raw: raw.into(),
            source: Box::new(source),
        })
    }

    /// 如果是 LLM 返回内容无法解析的错误，返回原始回复
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AppError::Llm(LlmError::MalformedResponse { raw, .. }) => Some(raw),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
