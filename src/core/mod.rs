//! 核心层：推理错误类型与查询编排器

pub mod error;
pub mod orchestrator;

pub use error::AgentError;
pub use orchestrator::{QueryOrchestrator, QueryResult};
