use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::utils::logging::log_startup;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    /// 初始化应用：汇总题目定义、加载候选人
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let state = AppState::new(&config).context("初始化应用状态失败")?;
        info!("✓ 应用状态初始化完成");

        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务，直到进程退出
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.bind_addr, self.config.port)
            .parse()
            .with_context(|| format!("监听地址无效: {}:{}", self.config.bind_addr, self.config.port))?;

        let router = create_router(self.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("无法监听 {}", addr))?;
        info!("🚀 服务已启动: http://{}", addr);

        axum::serve(listener, router).await.context("HTTP 服务异常退出")?;
        Ok(())
    }
}
