//! LLM 层：客户端抽象与实现

pub mod mock;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use crate::config::AppConfig;

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, TokenUsage};
pub use traits::LlmClient;

/// 按配置创建 LLM 客户端
///
/// provider = mock，或 provider = openai 但没有 OPENAI_API_KEY 时，落到 Mock，
/// 服务照常启动（开发与测试环境不需要真实 Key）。
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();

    if provider == "mock" {
        tracing::info!("Using mock LLM (provider = mock)");
        return Arc::new(MockLlmClient::new());
    }

    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => {
            tracing::info!("Using OpenAI-compatible LLM, model = {}", cfg.llm.model);
            Arc::new(OpenAiClient::new(
                cfg.llm.base_url.as_deref(),
                &cfg.llm.model,
                Some(&key),
                cfg.llm.temperature,
            ))
        }
        _ => {
            tracing::warn!("OPENAI_API_KEY not set, falling back to mock LLM");
            Arc::new(MockLlmClient::new())
        }
    }
}
