//! # Question Master
//!
//! 面试题目定义服务：读取、合并、缓存多语言题目定义，并通过 HTTP 提供表单数据
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 数据目录布局、文件指纹
//!
//! ### ② 业务能力层（Services）
//! - `QuestionMaster` - 多位置查找、分组字段合并、带依赖检查的缓存
//! - `SectionLoader` - 读取完整分区文件（简称、引导语）
//! - `CatalogService` - 目录选项
//! - `StateStore` / `CandidateRegistry` - 外部协作方的接口和内存实现
//!
//! ### ③ 流程层（Workflow）
//! - `FormFlow` - 组装一个候选人的表单（分区 → 题目 → 本地化 → 目录）
//!
//! ### ④ 接口层（API）
//! - `api/` - axum 路由：`/form/data`、`/form/save_section` 等
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use api::{create_router, AppState};
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::DataLayout;
pub use models::{QuestionDefinition, SectionDocument};
pub use services::{QuestionMaster, StateStore};
pub use workflow::FormFlow;
