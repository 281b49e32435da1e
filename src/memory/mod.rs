//! 会话记忆：消息类型、有界对话历史与进程级会话存储

pub mod conversation;
pub mod store;

pub use conversation::{ConversationMemory, Message, Role};
pub use store::SessionStore;
