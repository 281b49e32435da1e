//! 场景动作：回给 VR 客户端的结构化指令
//!
//! 本服务只构造动作，不执行；真正的副作用（高亮、音效）发生在客户端。

use serde::{Deserialize, Serialize};

/// highlight 动作的 command 值
pub const COMMAND_HIGHLIGHT: &str = "highlight";
/// playSound 动作的 command 值
pub const COMMAND_PLAY_SOUND: &str = "playSound";

/// 一条场景指令；command 只会是上面两个常量之一（由注册表的构造器保证）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub command: String,
    #[serde(rename = "targetID")]
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}
