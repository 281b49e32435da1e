//! MeXR 后端 - VR 医学解剖训练的查询解析服务
//!
//! 用户在 VR 场景里手持一个器官提问，本服务负责把问题落到知识库事实上、
//! 驱动 LLM 推理并产出结构化的场景动作（高亮/音效），最后组装成
//! 展示文本 + 语音文本 + 动作列表返回给客户端。
//!
//! 模块划分：
//! - **actions**: 场景动作与能力注册表（封闭能力集，schema 校验）
//! - **agent**: 推理层（Planner、提示词组装、能力调度循环）
//! - **config**: 应用配置（TOML + 环境变量）
//! - **core**: 查询编排器与推理错误类型
//! - **knowledge**: 解剖知识库（器官 -> 事实，启动时加载，只读）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **memory**: 会话历史（按会话保留最近 N 条消息）
//! - **server**: HTTP 边界（axum 路由与请求/响应模型）

pub mod actions;
pub mod agent;
pub mod config;
pub mod core;
pub mod knowledge;
pub mod llm;
pub mod memory;
pub mod server;
