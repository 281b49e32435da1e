//! Planner：推理调用与输出解析
//!
//! plan 负责拼上 system 提示词并在超时内调 LLM；parse_planner_output 从
//! 输出文本里提取 JSON 能力调用（裸 JSON 或 ```json 围栏），没有 JSON 的
//! 输出就是最终答案。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::memory::Message;

/// LLM 返回的能力调用：{"tool": "...", "args": {...}}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// 单步规划输出
#[derive(Debug, Clone)]
pub enum PlannerOutput {
    /// 最终答案，直接面向用户
    Answer(String),
    /// 调用一个能力
    Invoke(ToolCall),
}

/// 解析 LLM 输出
///
/// 含 "tool" 键的 JSON 视为能力调用，解析失败报 MalformedToolCall（调度循环
/// 会写回纠正提示）；不含 "tool" 的文本一律当最终答案，答案里出现花括号
/// 不会被误判成调用。
pub fn parse_planner_output(output: &str) -> Result<PlannerOutput, AgentError> {
    let trimmed = output.trim();

    let json_str: &str = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        match rest.find("```") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else if let Some(start) = trimmed.find('{') {
        // 右括号只在左括号之后找，"}...{" 顺序的普通文本不会切出倒置区间；
        // 左括号之后没有闭合时整段送去解析，损坏的调用落到 MalformedToolCall
        match trimmed[start..].rfind('}') {
            Some(rel) => &trimmed[start..=start + rel],
            None => trimmed,
        }
    } else {
        return Ok(PlannerOutput::Answer(trimmed.to_string()));
    };

    if !json_str.contains("\"tool\"") {
        return Ok(PlannerOutput::Answer(trimmed.to_string()));
    }

    let call: ToolCall = serde_json::from_str(json_str)
        .map_err(|e| AgentError::MalformedToolCall(format!("{}: {}", e, json_str)))?;

    if call.tool.is_empty() {
        Ok(PlannerOutput::Answer(trimmed.to_string()))
    } else {
        Ok(PlannerOutput::Invoke(call))
    }
}

/// Planner：持有 LLM 客户端、系统提示词与请求超时
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    request_timeout: Duration,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            request_timeout,
        }
    }

    /// 累计 token 用量
    pub fn token_usage(&self) -> (u64, u64, u64) {
        self.llm.token_usage()
    }

    /// system + 会话消息 -> LLM；超时和后端错误统一为 AgentError::Llm
    pub async fn plan(&self, messages: &[Message]) -> Result<String, AgentError> {
        let mut full = Vec::with_capacity(messages.len() + 1);
        full.push(Message::system(self.system_prompt.clone()));
        full.extend_from_slice(messages);

        match tokio::time::timeout(self.request_timeout, self.llm.complete(&full)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(AgentError::Llm(e)),
            Err(_) => Err(AgentError::Llm(format!(
                "request timed out after {}s",
                self.request_timeout.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use async_trait::async_trait;

    #[test]
    fn test_parse_plain_text_is_answer() {
        let output = parse_planner_output("The heart pumps blood.").unwrap();
        match output {
            PlannerOutput::Answer(text) => assert_eq!(text, "The heart pumps blood."),
            other => panic!("expected Answer, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bare_json_tool_call() {
        let output =
            parse_planner_output(r#"{"tool": "highlight_object", "args": {"target_id": "socket_heart"}}"#).unwrap();
        match output {
            PlannerOutput::Invoke(call) => {
                assert_eq!(call.tool, "highlight_object");
                assert_eq!(call.args["target_id"], "socket_heart");
            }
            other => panic!("expected Invoke, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fenced_json_tool_call() {
        let text = "Sure.\n```json\n{\"tool\": \"play_sound\", \"args\": {\"sound_id\": \"chime\"}}\n```";
        let output = parse_planner_output(text).unwrap();
        assert!(matches!(output, PlannerOutput::Invoke(call) if call.tool == "play_sound"));
    }

    #[test]
    fn test_parse_missing_args_defaults_to_null() {
        let output = parse_planner_output(r#"{"tool": "play_sound"}"#).unwrap();
        match output {
            PlannerOutput::Invoke(call) => assert!(call.args.is_null()),
            other => panic!("expected Invoke, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_braces_in_prose_stay_answer() {
        let output = parse_planner_output("The set {a, b} is small.").unwrap();
        assert!(matches!(output, PlannerOutput::Answer(_)));
    }

    #[test]
    fn test_parse_close_brace_before_open_is_answer() {
        // 右括号先于左括号出现的普通文本，不是调用也不能 panic
        let text = "Close it :} then we open a new topic {unfinished";
        let output = parse_planner_output(text).unwrap();
        match output {
            PlannerOutput::Answer(answer) => assert_eq!(answer, text),
            other => panic!("expected Answer, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_call_after_stray_close_brace() {
        // 前面有杂散右括号时仍能取到后面的完整调用
        let text = r#"} noise {"tool": "play_sound", "args": {"sound_id": "chime"}}"#;
        let output = parse_planner_output(text).unwrap();
        assert!(matches!(output, PlannerOutput::Invoke(call) if call.tool == "play_sound"));
    }

    #[test]
    fn test_parse_empty_tool_name_is_answer() {
        let output = parse_planner_output(r#"{"tool": "", "args": {}}"#).unwrap();
        assert!(matches!(output, PlannerOutput::Answer(_)));
    }

    #[test]
    fn test_parse_broken_tool_json_is_malformed() {
        let err = parse_planner_output(r#"{"tool": "highlight_object", "args": }"#).unwrap_err();
        assert!(matches!(err, AgentError::MalformedToolCall(_)));
    }

    #[test]
    fn test_parse_truncated_tool_json_is_malformed() {
        let err = parse_planner_output(r#"{"tool": "highlight_object", "args": {"target_id""#).unwrap_err();
        assert!(matches!(err, AgentError::MalformedToolCall(_)));
    }

    #[tokio::test]
    async fn test_plan_prepends_system_prompt() {
        let mock = Arc::new(MockLlmClient::new());
        let planner = Planner::new(mock.clone(), "sys prompt", Duration::from_secs(5));
        planner.plan(&[Message::user("hello")]).await.unwrap();
        let requests = mock.requests();
        assert_eq!(requests[0][0].content, "sys prompt");
        assert_eq!(requests[0][1].content, "hello");
    }

    #[tokio::test]
    async fn test_plan_maps_backend_error() {
        let mock = Arc::new(MockLlmClient::with_replies(vec![Err("boom".to_string())]));
        let planner = Planner::new(mock, "sys", Duration::from_secs(5));
        let err = planner.plan(&[Message::user("q")]).await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(e) if e == "boom"));
    }

    struct SlowClient;

    #[async_trait]
    impl crate::llm::LlmClient for SlowClient {
        async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_plan_times_out() {
        let planner = Planner::new(Arc::new(SlowClient), "sys", Duration::from_millis(20));
        let err = planner.plan(&[Message::user("q")]).await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(e) if e.contains("timed out")));
    }
}
