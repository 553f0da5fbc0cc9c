//! 分区文件读取服务 - 业务能力层
//!
//! 完整读取一个分区 JSON（不经过缓存），用于获取分区简称和引导语

use crate::infrastructure::{is_safe_name, normalize_file_name, DataLayout};
use crate::models::{read_json_file, SectionFile};
use crate::utils::resolve_text;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// 分区文件读取服务
pub struct SectionLoader {
    layout: DataLayout,
}

impl SectionLoader {
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    /// 读取分区文件原始内容
    ///
    /// 顺序：企业（或全局）分区目录 → 全局分区目录 → 旧版资源目录
    pub fn load_section_json(&self, name: &str, tenant: Option<&str>) -> Option<Value> {
        let file_name = normalize_file_name(name);
        if !is_safe_name(&file_name) {
            warn!("⚠️ 分区名无效，忽略: '{}'", name);
            return None;
        }

        let tenant = tenant.map(str::trim).filter(|t| !t.is_empty());
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(dir) = self.layout.sections_dir_for(tenant) {
            candidates.push(dir.join(&file_name));
        }
        candidates.push(self.layout.sections_dir().join(&file_name));
        candidates.push(self.layout.resources_dir().join(&file_name));
        candidates.dedup();

        for path in candidates {
            match read_json_file(&path) {
                Ok(Some(value)) => {
                    debug!("分区文件已读取: {}", path.display());
                    return Some(value);
                }
                Ok(None) => debug!("分区文件不存在: {}", path.display()),
                Err(e) => error!("❌ 无法加载分区文件 {}: {}", path.display(), e),
            }
        }

        warn!("⚠️ 找不到分区文件 '{}'", file_name);
        None
    }

    /// 分区显示名称
    ///
    /// 有 `nombre_corto` 时按语言取值，否则由文件名生成
    pub fn section_display_name(&self, name: &str, document: Option<&Value>, language: &str) -> String {
        let short_name = document
            .and_then(SectionFile::from_value)
            .and_then(|file| file.short_name().map(|v| resolve_text(v, language)))
            .filter(|text| !text.is_empty());

        match short_name {
            Some(text) => text,
            None => {
                debug!("分区 '{}' 没有 nombre_corto，使用文件名", name);
                fallback_display_name(name)
            }
        }
    }
}

/// `datos_generales.json` → `Datos generales`
pub fn fallback_display_name(name: &str) -> String {
    let base = name.trim().trim_end_matches(".json").replace('_', " ");
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
