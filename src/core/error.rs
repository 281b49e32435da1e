//! 推理层错误类型
//!
//! 能力参数错误（CapabilityError）在调度循环内消化，不在此列；
//! 这里只有需要编排器兜底转成道歉回复的失败。

use thiserror::Error;

/// 推理过程中的失败
#[derive(Debug, Error)]
pub enum AgentError {
    /// LLM 后端不可用、返回错误或超时
    #[error("LLM error: {0}")]
    Llm(String),

    /// LLM 输出了无法解析的 JSON 调用
    #[error("malformed tool call: {0}")]
    MalformedToolCall(String),

    /// 步数耗尽仍没有最终答案
    #[error("no final answer after {0} steps")]
    StepLimit(usize),
}
