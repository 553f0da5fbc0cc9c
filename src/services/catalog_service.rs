//! 目录服务 - 业务能力层
//!
//! 读取 `catalogos/<ref>.json` 并按语言展开选项

use crate::infrastructure::DataLayout;
use crate::models::{load_json_file, Catalog};
use tracing::{error, warn};

/// 目录服务
pub struct CatalogService {
    layout: DataLayout,
}

impl CatalogService {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    /// 目录选项；目录不存在或无法解析时返回空列表
    pub fn resolve_options(&self, catalog_ref: &str, language: &str) -> Vec<String> {
        let Some(path) = self.layout.catalog_file(catalog_ref) else {
            warn!("⚠️ 目录引用无效: '{}'", catalog_ref);
            return Vec::new();
        };

        match load_json_file::<Catalog>(&path) {
            Ok(Some(catalog)) => catalog.options(language),
            Ok(None) => {
                warn!("⚠️ 找不到目录文件: {}", path.display());
                Vec::new()
            }
            Err(e) => {
                error!("❌ 无法加载目录 '{}': {}", catalog_ref, e);
                Vec::new()
            }
        }
    }
}
