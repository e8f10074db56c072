use crate::error::{AppError, AppResult, ConfigError};
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 目录批处理时同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    /// API 密钥，没有默认值；缺失时生成路径直接失败
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 发送给模型的文本截取长度（字符数）
    pub llm_excerpt_chars: usize,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 8,
            verbose_logging: false,
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.0-flash".to_string(),
            llm_excerpt_chars: 4000,
            llm_max_tokens: 8192,
            llm_temperature: 0.3,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    ///
    /// 数值类环境变量存在但无法解析时返回 [`ConfigError::EnvVarParseFailed`]。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            max_concurrent_documents: parse_env("MAX_CONCURRENT_DOCUMENTS", "usize")?
                .unwrap_or(default.max_concurrent_documents)
                .max(1),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            llm_api_key: resolve_api_key(),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_excerpt_chars: parse_env("LLM_EXCERPT_CHARS", "usize")?
                .unwrap_or(default.llm_excerpt_chars),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", "u32")?.unwrap_or(default.llm_max_tokens),
            llm_temperature: parse_env("LLM_TEMPERATURE", "f32")?
                .unwrap_or(default.llm_temperature),
        })
    }

    /// 命令行传入的密钥优先于环境变量
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.llm_api_key = Some(key);
        }
        self
    }
}

/// 依次查找 LLM_API_KEY、GEMINI_API_KEY、GOOGLE_AI_KEY
fn resolve_api_key() -> Option<String> {
    ["LLM_API_KEY", "GEMINI_API_KEY", "GOOGLE_AI_KEY"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn parse_env<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credential() {
        let config = Config::default();
        assert!(config.llm_api_key.is_none());
        assert_eq!(config.llm_excerpt_chars, 4000);
    }

    #[test]
    fn test_with_api_key_ignores_blank() {
        let config = Config::default().with_api_key(Some("   ".to_string()));
        assert!(config.llm_api_key.is_none());

        let config = Config::default().with_api_key(Some("secret".to_string()));
        assert_eq!(config.llm_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_env_reports_bad_value() {
        std::env::set_var("QUIZ_EXTRACT_TEST_BAD_NUMBER", "many");
        let result: AppResult<Option<usize>> = parse_env("QUIZ_EXTRACT_TEST_BAD_NUMBER", "usize");
        std::env::remove_var("QUIZ_EXTRACT_TEST_BAD_NUMBER");

        match result {
            Err(AppError::Config(ConfigError::EnvVarParseFailed { value, .. })) => {
                assert_eq!(value, "many");
            }
            other => panic!("应该返回解析错误: {:?}", other),
        }
    }

    #[test]
    fn test_parse_env_missing_is_none() {
        let result: Option<u32> = parse_env("QUIZ_EXTRACT_TEST_UNSET_VAR", "u32").unwrap();
        assert!(result.is_none());
    }
}
