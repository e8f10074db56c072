pub mod llm_service;

pub use llm_service::{build_generation_prompt, parse_generated_reply, strip_code_fence, LlmService};
