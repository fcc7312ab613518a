//! 接口层（HTTP）
//!
//! 单页表单界面：`GET /` 渲染页面，所有 POST 处理后重定向回 `/`

pub mod handlers;
pub mod render;
pub mod session_cookie;
pub mod ui_text;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::models::Locale;
use crate::orchestrator::{SessionController, SessionStore};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SessionController>,
    pub sessions: Arc<SessionStore>,
    /// 界面语言
    pub interface_language: Locale,
}

/// 组装路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/teacher/assignments", post(handlers::edit_assignment))
        .route("/teacher/assignments/{id}/delete", post(handlers::delete_assignment))
        .route("/student/submissions", post(handlers::submit))
        .route("/student/answer", post(handlers::answer))
        .route("/student/reset", post(handlers::reset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
