//! Mock LLM 客户端（测试与无 Key 环境）
//!
//! 按脚本顺序吐回复，脚本项可以是 Err 用来模拟后端故障；脚本耗尽后
//! 回一条纯文本兜底答案（不会触发能力调用）。同时记录每次收到的完整
//! 消息序列，测试据此断言提示词与 grounding 内容。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::memory::{Message, Role};

/// Mock 客户端：FIFO 脚本 + 请求记录
#[derive(Debug, Default)]
pub struct MockLlmClient {
    replies: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置脚本，按顺序弹出
    pub fn with_replies(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 每次 complete 收到的完整消息序列（含 system）
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// 已收到的请求次数
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }
        if let Ok(mut replies) = self.replies.lock() {
            if let Some(reply) = replies.pop_front() {
                return reply;
            }
        }
        // 兜底：回显最后一条 user 消息，纯文本
        let last_user = messages
            .iter()
            .rev()
            .find(|m| matches!(m.role, Role::User))
            .map(|m| m.content.as_str())
            .unwrap_or("(no input)");
        Ok(format!("Mock answer: {}", last_user))
    }
}
