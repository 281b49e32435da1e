//! 能力调度循环
//!
//! plan -> 解析 -> 能力调用则校验构造 Action 并把观察写回 -> 下一轮，
//! 直到拿到纯文本最终答案或步数耗尽。能力参数错误在循环内消化
//! （写回纠正观察，LLM 下一轮自行修正），不向上抛；LLM 失败和步数
//! 耗尽抛 AgentError，由编排器统一兜底。

use std::collections::HashSet;

use crate::actions::{Action, Capability};
use crate::agent::planner::{parse_planner_output, Planner, PlannerOutput};
use crate::core::AgentError;
use crate::memory::Message;

/// 单次查询内的最大推理步数，防推理死循环
pub const MAX_AGENT_STEPS: usize = 8;

/// 一次推理的结果：最终答案 + 按调用顺序收集的动作
#[derive(Debug)]
pub struct AgentReply {
    pub text: String,
    pub actions: Vec<Action>,
}

/// 跑一次完整推理
///
/// `messages` 是会话历史加 grounding（最旧在前），`known_sockets` 用来
/// 校验高亮目标：不在知识库里的目标只告警不拦截，客户端对未知 id 自会忽略。
pub async fn run_agent(
    planner: &Planner,
    messages: &[Message],
    known_sockets: &HashSet<String>,
) -> Result<AgentReply, AgentError> {
    let mut transcript: Vec<Message> = messages.to_vec();
    let mut actions: Vec<Action> = Vec::new();

    for _ in 0..MAX_AGENT_STEPS {
        let output = planner.plan(&transcript).await?;

        match parse_planner_output(&output) {
            Ok(PlannerOutput::Answer(text)) => {
                return Ok(AgentReply { text, actions });
            }
            Ok(PlannerOutput::Invoke(call)) => {
                let observation = match Capability::build(&call.tool, call.args.clone()) {
                    Ok(capability) => {
                        if let Capability::Highlight(args) = &capability {
                            if !known_sockets.contains(args.target_id.as_str()) {
                                tracing::warn!(
                                    target_id = %args.target_id,
                                    "highlight target not in knowledge base"
                                );
                            }
                        }
                        let action = capability.into_action();
                        let summary =
                            serde_json::to_string(&action).unwrap_or_else(|_| action.command.clone());
                        actions.push(action);
                        audit(&call.tool, true);
                        format!(
                            "Action queued: {}. Reply with the final answer as plain text, or invoke another capability.",
                            summary
                        )
                    }
                    Err(e) => {
                        audit(&call.tool, false);
                        format!("Error: {}", e)
                    }
                };
                transcript.push(Message::assistant(format!(
                    "Tool call: {} | Result: {}",
                    call.tool, observation
                )));
                transcript.push(Message::user(format!(
                    "Observation from {}: {}",
                    call.tool, observation
                )));
            }
            Err(AgentError::MalformedToolCall(detail)) => {
                tracing::warn!("malformed tool call from LLM: {}", detail);
                transcript.push(Message::user(format!(
                    "The previous reply was not valid JSON ({}). To invoke a capability, reply with exactly one JSON object: {{\"tool\": \"<name>\", \"args\": {{...}}}}. Otherwise reply with the final answer as plain text.",
                    detail
                )));
            }
            Err(e) => return Err(e),
        }
    }

    Err(AgentError::StepLimit(MAX_AGENT_STEPS))
}

/// 每次能力派发记一条结构化审计日志
fn audit(capability: &str, ok: bool) {
    let audit = serde_json::json!({
        "event": "capability_audit",
        "capability": capability,
        "ok": ok,
    });
    tracing::info!(audit = %audit, "capability");
}
