//! 应用生命周期 - 编排层
//!
//! 初始化日志与资源（存储、模型客户端、会话表），然后启动 HTTP 服务

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, AppState};
use crate::clients::OpenAiChatModel;
use crate::config::Config;
use crate::infrastructure::Storage;
use crate::orchestrator::controller::SessionController;
use crate::orchestrator::session::SessionStore;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init(config.verbose_logging);
        logging::log_startup(&config);

        let storage = Arc::new(Storage::new(&config.data_dir));
        tokio::fs::create_dir_all(storage.root())
            .await
            .with_context(|| format!("无法创建数据目录: {}", config.data_dir))?;

        let model = Arc::new(OpenAiChatModel::new(&config));
        let controller = SessionController::new(model, storage, &config);

        let state = AppState {
            controller: Arc::new(controller),
            sessions: Arc::new(SessionStore::new()),
            interface_language: config.interface_language,
        };

        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务直到进程退出
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("无法监听地址: {}", self.config.bind_addr))?;
        info!("✅ 服务已启动: http://{}", listener.local_addr()?);

        axum::serve(listener, api::create_router(self.state))
            .await
            .context("HTTP 服务异常退出")?;
        Ok(())
    }
}
