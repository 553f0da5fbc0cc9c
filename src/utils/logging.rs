/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择默认级别。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "question_master=debug,tower_http=debug,warn"
    } else {
        "question_master=info,tower_http=info,warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 面试题目服务");
    info!("📁 数据目录: {}", config.data_root);
    info!("📁 旧版资源目录: {}", config.resources_dir);
    info!(
        "🏢 默认企业: {}",
        config.default_tenant.as_deref().unwrap_or("(全局)")
    );
    info!("🌐 默认语言: {}", config.default_language);
    info!("{}", "=".repeat(60));
}

/// 记录题目汇总信息
pub fn log_fields_loaded(sections: usize, fields: usize) {
    info!("✓ 已汇总 {} 个分区文件，共 {} 个题目字段", sections, fields);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
