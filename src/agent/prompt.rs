//! 提示词组装
//!
//! 系统提示词优先读 config/prompts/system.md（缺失时用内置版本），
//! 尾部追加能力调用协议与能力目录；grounding 把原始问题和器官事实
//! 拼成一条 user 消息，推理只围绕这份事实进行。

use std::path::Path;

use crate::actions::catalog_json;
use crate::knowledge::OrganRecord;

/// 内置系统提示词，提示词文件缺失时兜底
const FALLBACK_SYSTEM_PROMPT: &str = r#"You are an expert anatomy AI assistant inside a medical training VR simulation.
The user is holding an organ and asks a spoken question about it. Answer using only the facts given in the context.

Rules:
1. Give one clear, concise answer. It is shown on screen and spoken aloud, so keep it short and natural.
2. If the question is about location or placement (e.g. "where does this go?"), you MUST invoke highlight_object with the organ's correct socket id from the context before giving the final answer.
3. You may invoke play_sound for extra feedback, e.g. sound id positive_feedback_chime.
4. Never invent organs, sockets or facts that are not in the context."#;

/// 读系统提示词文件，失败时退回内置版本
pub fn load_system_prompt(config_base: &Path) -> String {
    let candidates = [
        config_base.join("prompts").join("system.md"),
        Path::new("../config/prompts/system.md").to_path_buf(),
    ];
    candidates
        .into_iter()
        .find_map(|p| std::fs::read_to_string(p).ok())
        .unwrap_or_else(|| FALLBACK_SYSTEM_PROMPT.to_string())
}

/// 完整系统提示词 = 基础提示词 + 调用协议 + 能力目录
pub fn compose_system_prompt(base: &str) -> String {
    format!(
        "{}\n\n## Available capabilities\n\nTo invoke a capability, reply with exactly one JSON object and nothing else:\n{{\"tool\": \"<capability name>\", \"args\": {{...}}}}\nWhen you are done, reply with the final answer as plain text (no JSON).\n\n{}",
        base.trim_end(),
        catalog_json()
    )
}

/// grounding 上下文：原始问题 + 手持器官的事实
pub fn grounding_context(query: &str, organ: &OrganRecord) -> String {
    format!(
        "User Query: \"{}\"\nHeld Organ: {} (ID: {})\nCorrect Socket ID for this organ: {}\nFunction of this organ: {}\nGeneral description: {}",
        query, organ.display_name, organ.id, organ.socket_id, organ.function, organ.description
    )
}
