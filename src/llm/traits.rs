//! LLM 客户端抽象
//!
//! 所有后端实现 complete；错误先用 String 承载，上层统一转 AgentError。

use async_trait::async_trait;

use crate::memory::Message;

/// LLM 客户端：非流式单次完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 给完整消息序列（含 system），返回纯文本输出
    async fn complete(&self, messages: &[Message]) -> Result<String, String>;

    /// 累计 token 统计：(prompt, completion, total)；不支持统计的后端返回全 0
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
