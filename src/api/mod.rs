//! API 模块
//!
//! HTTP 路由和共享状态

pub mod extract;
pub mod form;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::DataLayout;
use crate::services::{CandidateRegistry, MemoryStateStore, QuestionMaster, StateStore};
use crate::workflow::FormFlow;
use axum::extract::State;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub use extract::{CurrentCandidate, CANDIDATE_HEADER};

/// 请求处理函数共享的状态
#[derive(Clone)]
pub struct AppState {
    pub form: Arc<FormFlow>,
    pub store: Arc<dyn StateStore>,
    pub candidates: Arc<CandidateRegistry>,
    pub default_language: String,
}

impl AppState {
    /// 按配置创建：汇总题目、加载候选人、使用内存状态存储
    pub fn new(config: &Config) -> AppResult<Self> {
        let layout = DataLayout::from_config(config);
        if !layout.root().is_dir() {
            warn!("⚠️ 数据目录不存在: {}", layout.root().display());
        }

        let master = Arc::new(QuestionMaster::new(layout, config.default_tenant.as_deref()));

        let candidates = match &config.candidates_file {
            Some(path) => CandidateRegistry::from_file(Path::new(path))?,
            None => {
                warn!("⚠️ 未配置候选人文件，所有表单请求都会被拒绝");
                CandidateRegistry::new()
            }
        };

        Ok(Self::with_parts(
            master,
            Arc::new(MemoryStateStore::new()),
            Arc::new(candidates),
            &config.default_language,
        ))
    }

    pub fn with_parts(
        master: Arc<QuestionMaster>,
        store: Arc<dyn StateStore>,
        candidates: Arc<CandidateRegistry>,
        default_language: &str,
    ) -> Self {
        Self {
            form: Arc::new(FormFlow::new(master)),
            store,
            candidates,
            default_language: default_language.to_uppercase(),
        }
    }
}

/// 创建路由
pub fn create_router(state: AppState) -> Router {
    let form_routes = Router::new()
        .route("/data", get(form::get_form_data))
        .route("/save_section", post(form::save_section))
        .route("/save_group_item/:group_key", post(form::save_group_item))
        .route("/delete_group_item/:group_key", post(form::delete_group_item))
        .route("/visited", post(form::mark_visited));

    info!("🌐 注册路由: /health, /form/*");

    Router::new()
        .route("/health", get(health_check))
        .nest("/form", form_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let master = state.form.master();
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "campos": master.all_fields().len(),
        "secciones_en_cache": master.cached_sections(),
    }))
}
