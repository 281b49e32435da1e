//! HTTP 边界：axum 路由与请求/响应模型
//!
//! 入参校验（缺字段、类型错）由 Json 提取器在进入核心前拒绝（422）；
//! 进入核心后永远拿到完整的 QueryResult，这里只做序列化搬运。

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::core::{QueryOrchestrator, QueryResult};

/// 共享状态
pub struct AppState {
    pub orchestrator: QueryOrchestrator,
}

/// VR 场景上下文
#[derive(Debug, Deserialize)]
pub struct QueryContext {
    /// 用户当前手持器官的 id
    #[serde(rename = "heldObject")]
    pub held_object: String,
}

/// POST /medtech/query 请求体
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// 会话 id，由客户端生成并保持
    #[serde(rename = "sessionID")]
    pub session_id: String,
    pub context: QueryContext,
    /// 用户的口述问题
    pub query: String,
}

/// POST /medtech/session/clear 请求体
#[derive(Debug, Deserialize)]
pub struct ClearSessionRequest {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

/// GET /medtech/organs 列表项
#[derive(Debug, Serialize)]
pub struct OrganListItem {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "socketID")]
    pub socket_id: String,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/medtech/query", post(medtech_query))
        .route("/medtech/organs", get(medtech_organs))
        .route("/medtech/session/clear", post(session_clear))
        .with_state(state)
}

/// GET / - 服务描述
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "MeXR Backend is running",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
    }))
}

/// GET /health - 存活探针
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "MeXR Backend",
    }))
}

/// POST /medtech/query - 处理一次 VR 查询
async fn medtech_query(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Json<QueryResult> {
    let result = state
        .orchestrator
        .handle_query(&req.session_id, &req.context.held_object, &req.query)
        .await;
    Json(result)
}

/// GET /medtech/organs - 已知器官列表（供客户端同步场景配置）
async fn medtech_organs(State(state): State<Arc<AppState>>) -> Json<Vec<OrganListItem>> {
    let mut organs: Vec<OrganListItem> = state
        .orchestrator
        .knowledge()
        .all()
        .map(|r| OrganListItem {
            id: r.id.clone(),
            display_name: r.display_name.clone(),
            socket_id: r.socket_id.clone(),
        })
        .collect();
    organs.sort_by(|a, b| a.id.cmp(&b.id));
    Json(organs)
}

/// POST /medtech/session/clear - 清除会话历史，幂等
async fn session_clear(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClearSessionRequest>,
) -> Json<serde_json::Value> {
    state.orchestrator.sessions().clear(&req.session_id).await;
    tracing::info!(session_id = %req.session_id, "session cleared");
    Json(serde_json::json!({
        "status": "cleared",
        "sessionID": req.session_id,
    }))
}
