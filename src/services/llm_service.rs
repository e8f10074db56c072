//! LLM 服务 - 生成式出题
//!
//! 把文本交给生成式模型出题，再整理成与启发式解析相同的题目记录。
//! 与启发式解析互不依赖，由调用方二选一；失败时原样返回错误，不自动回退。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（如 Gemini 的 OpenAI 兼容端点）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};
use crate::models::{ExamMetadata, GeneratedQuestion, QuestionRecord};

const SYSTEM_MESSAGE: &str =
    "You are an expert quiz generator for NISER/IISER entrance exam preparation.";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 根据文本生成选择题
/// - 解析模型回复（容忍 Markdown 代码块包裹）
/// - 不做任何启发式解析
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    excerpt_chars: usize,
    max_tokens: u32,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    ///
    /// 没有可用的 API 密钥时直接返回 [`LlmError::MissingCredential`]，不会发出任何请求。
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_key = config
            .llm_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AppError::Llm(LlmError::MissingCredential))?;

        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            excerpt_chars: config.llm_excerpt_chars,
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        })
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.chars().count());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::Llm(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }

    /// 根据文本生成题目
    ///
    /// 只发送前 `llm_excerpt_chars` 个字符。回复无法解析时返回
    /// [`LlmError::MalformedResponse`]，其中带有原始回复。
    pub async fn generate_questions(
        &self,
        text: &str,
        metadata: Option<&ExamMetadata>,
    ) -> AppResult<Vec<QuestionRecord>> {
        info!("🤖 使用 LLM 生成题目，模型: {}", self.model_name);

        let prompt = build_generation_prompt(text, self.excerpt_chars);
        let reply = self.send_to_llm(&prompt, Some(SYSTEM_MESSAGE)).await?;
        let generated = parse_generated_reply(&reply)?;

        info!("✓ LLM 返回 {} 道题目", generated.len());

        Ok(generated
            .into_iter()
            .enumerate()
            .map(|(i, question)| question.into_record(i as u32 + 1, metadata))
            .collect())
    }
}

/// 构建出题提示词，文本按字符截断
pub fn build_generation_prompt(text: &str, excerpt_chars: usize) -> String {
    let excerpt: String = text.chars().take(excerpt_chars).collect();

    format!(
        r#"Convert the following text into multiple-choice questions suitable for science students.

Format each question as JSON:
{{
  "question": "The question text",
  "options": ["A) option1", "B) option2", "C) option3", "D) option4"],
  "correctAnswer": "A",
  "explanation": "Brief explanation of why this is correct",
  "difficulty": "easy/medium/hard",
  "topic": "relevant topic name"
}}

Requirements:
- Create 10-15 high-quality questions
- Cover all major concepts in the text
- Include mix of difficulty levels
- Make distractors plausible but incorrect
- Keep explanations concise

TEXT:
{}

Return ONLY valid JSON array, no other text."#,
        excerpt
    )
}

/// 去掉模型回复外层的 Markdown 代码块（```json ... ``` 或 ``` ... ```）
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // 跳过语言标记（json 等）
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// 解析模型回复为题目列表
pub fn parse_generated_reply(reply: &str) -> AppResult<Vec<GeneratedQuestion>> {
    let json = strip_code_fence(reply);
    serde_json::from_str::<Vec<GeneratedQuestion>>(json).map_err(|e| {
        warn!("无法解析 LLM 回复: {}", e);
        AppError::malformed_response(reply, e)
    })
}
