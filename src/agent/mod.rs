//! 推理层：Planner、提示词组装与能力调度循环

pub mod loop_;
pub mod planner;
pub mod prompt;

pub use loop_::{run_agent, AgentReply, MAX_AGENT_STEPS};
pub use planner::{parse_planner_output, Planner, PlannerOutput, ToolCall};
pub use prompt::{compose_system_prompt, grounding_context, load_system_prompt};
