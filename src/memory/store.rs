//! 会话历史存储
//!
//! 进程级共享的 session id -> 有界对话历史。外层锁只用来取/建会话句柄，
//! 追加发生在各会话自己的锁里，不同会话之间互不阻塞；
//! 同一会话的一次交互（user + assistant + 剪枝）在会话锁内整体完成，
//! 并发提问不会只留下半次交互。

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::memory::{ConversationMemory, Message};

/// 会话存储；会话在第一次追加时惰性创建
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<ConversationMemory>>>>,
    max_messages: usize,
}

impl SessionStore {
    pub fn new(max_messages: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_messages,
        }
    }

    /// 当前历史快照（最旧在前）；未知会话返回空，不创建
    pub async fn history(&self, session_id: &str) -> Vec<Message> {
        let handle = {
            let sessions = self.sessions.read().await;
            sessions.get(session_id).cloned()
        };
        match handle {
            Some(handle) => handle.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }

    /// 追加一次交互并剪枝到最近 N 条
    pub async fn append_exchange(&self, session_id: &str, user_text: &str, assistant_text: &str) {
        let handle = self.get_or_create(session_id).await;
        let mut memory = handle.lock().await;
        memory.push_exchange(user_text, assistant_text);
    }

    /// 移除会话；对不存在的会话是 no-op
    pub async fn clear(&self, session_id: &str) {
        self.sessions.write().await.remove(session_id);
    }

    /// 当前活跃会话数
    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<ConversationMemory>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(session_id) {
                return Arc::clone(handle);
            }
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ConversationMemory::new(self.max_messages)))),
        )
    }
}
