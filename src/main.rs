//! MeXR 后端入口
//!
//! 初始化日志，加载配置、知识库与系统提示词，构建 LLM 客户端与
//! 查询编排器，然后启动 HTTP 服务。

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mexr::agent::{compose_system_prompt, load_system_prompt, Planner};
use mexr::config::load_config;
use mexr::core::QueryOrchestrator;
use mexr::knowledge::KnowledgeBase;
use mexr::llm::create_llm_from_config;
use mexr::memory::SessionStore;
use mexr::server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，RUST_LOG 可覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).unwrap_or_default();

    let config_base = Path::new("config");
    let knowledge = Arc::new(KnowledgeBase::load(config_base));
    tracing::info!("Knowledge base ready, {} organs", knowledge.len());

    let llm = create_llm_from_config(&cfg);
    let system_prompt = compose_system_prompt(&load_system_prompt(config_base));
    let planner = Planner::new(llm, system_prompt, Duration::from_secs(cfg.llm.timeouts.request));

    let sessions = Arc::new(SessionStore::new(cfg.app.max_history_messages));
    let orchestrator = QueryOrchestrator::new(knowledge, sessions, planner);

    let app = create_router(Arc::new(AppState { orchestrator }));

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    tracing::info!("MeXR backend listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
