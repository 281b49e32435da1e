//! 查询编排器
//!
//! 一次查询的完整管线：查器官 -> 取历史 -> 推理（可产生 0..N 个动作）
//! -> 写历史 -> 组装响应。未知器官短路返回，不写历史也不调推理；
//! 推理失败统一转固定道歉回复，错误只进日志，绝不向 HTTP 边界抛异常。

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::agent::{grounding_context, run_agent, Planner};
use crate::knowledge::KnowledgeBase;
use crate::memory::{Message, SessionStore};

/// 推理失败时的固定回复
const APOLOGY_TEXT: &str = "I'm sorry, I encountered an error while answering. Please try again.";

/// 一次查询的最终结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// 屏幕展示文本
    #[serde(rename = "displayText")]
    pub display_text: String,
    /// 语音播报文本
    #[serde(rename = "spokenResponse")]
    pub spoken_response: String,
    /// 场景动作，按调用顺序
    pub actions: Vec<Action>,
}

impl QueryResult {
    fn text_only(display: impl Into<String>, spoken: impl Into<String>) -> Self {
        Self {
            display_text: display.into(),
            spoken_response: spoken.into(),
            actions: Vec::new(),
        }
    }
}

/// 查询编排器：持有知识库、会话存储与 Planner
pub struct QueryOrchestrator {
    knowledge: Arc<KnowledgeBase>,
    sessions: Arc<SessionStore>,
    planner: Planner,
    known_sockets: HashSet<String>,
}

impl QueryOrchestrator {
    pub fn new(knowledge: Arc<KnowledgeBase>, sessions: Arc<SessionStore>, planner: Planner) -> Self {
        let known_sockets = knowledge.socket_ids();
        Self {
            knowledge,
            sessions,
            planner,
            known_sockets,
        }
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// 处理一次查询；总是返回完整的 QueryResult
    pub async fn handle_query(&self, session_id: &str, held_object_id: &str, query_text: &str) -> QueryResult {
        tracing::info!(session_id, held_object = held_object_id, "query received");

        // 未知器官短路：不写历史、不调推理
        let Some(organ) = self.knowledge.lookup(held_object_id) else {
            tracing::warn!(held_object = held_object_id, "unknown organ id");
            return QueryResult::text_only(
                format!("Error: Organ with ID '{}' not found.", held_object_id),
                "I'm sorry, I don't have information about that object.",
            );
        };

        // 历史（最旧在前）+ 本轮 grounding
        let mut messages = self.sessions.history(session_id).await;
        messages.push(Message::user(grounding_context(query_text, organ)));

        // 推理；任何失败在这里兜底成道歉，历史保持原样
        let reply = match run_agent(&self.planner, &messages, &self.known_sockets).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id, error = %e, "reasoning failed");
                return QueryResult::text_only(APOLOGY_TEXT, APOLOGY_TEXT);
            }
        };

        // 只有成功的回合进入历史；存的是原始问题而不是 grounding
        self.sessions.append_exchange(session_id, query_text, &reply.text).await;

        let (prompt_tokens, completion_tokens, total_tokens) = self.planner.token_usage();
        tracing::info!(
            session_id,
            actions = reply.actions.len(),
            prompt_tokens,
            completion_tokens,
            total_tokens,
            "query answered"
        );

        QueryResult {
            display_text: reply.text.clone(),
            spoken_response: reply.text,
            actions: reply.actions,
        }
    }
}
