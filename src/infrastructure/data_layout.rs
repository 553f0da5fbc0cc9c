//! 题目数据目录布局 - 基础设施层
//!
//! 只负责"文件在哪里"，不读取内容

use crate::config::Config;
use std::path::{Path, PathBuf};

/// 汇总题目时跳过的文件（不是分区定义）
pub static RESERVED_SECTION_FILES: phf::Set<&'static str> = phf::phf_set! {
    "secciones.json",
    "config_entrevista.json",
    "frases_entrevista.json",
};

/// 数据目录布局
///
/// ```text
/// <root>/secciones/                     全局分区
/// <root>/empresas/<企业>/secciones/      企业分区
/// <root>/grupos/                        分组分区
/// <root>/grupos/datos/<分组>/            分组题目
/// <root>/datos/                         单个题目 / 平铺文档
/// <root>/catalogos/                     目录
/// ```
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
    resources_dir: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>, resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            resources_dir: resources_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data_root, &config.resources_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sections_dir(&self) -> PathBuf {
        self.root.join("secciones")
    }

    /// 企业专属分区目录，企业名不合法时返回 `None`
    pub fn tenant_sections_dir(&self, tenant: &str) -> Option<PathBuf> {
        is_safe_name(tenant).then(|| self.root.join("empresas").join(tenant).join("secciones"))
    }

    /// 有企业时使用企业目录，否则使用全局目录
    pub fn sections_dir_for(&self, tenant: Option<&str>) -> Option<PathBuf> {
        match tenant {
            Some(tenant) => self.tenant_sections_dir(tenant),
            None => Some(self.sections_dir()),
        }
    }

    pub fn groups_dir(&self) -> PathBuf {
        self.root.join("grupos")
    }

    pub fn grouped_data_dir(&self) -> PathBuf {
        self.groups_dir().join("datos")
    }

    pub fn datos_dir(&self) -> PathBuf {
        self.root.join("datos")
    }

    pub fn catalogs_dir(&self) -> PathBuf {
        self.root.join("catalogos")
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// 单个题目文件 `datos/<clave>.json`
    pub fn question_file(&self, clave: &str) -> Option<PathBuf> {
        is_safe_name(clave).then(|| self.datos_dir().join(format!("{}.json", clave)))
    }

    /// 分组内的题目文件 `grupos/datos/<前缀>/<clave>.json`
    pub fn group_question_file(&self, prefix: &str, clave: &str) -> Option<PathBuf> {
        (is_safe_name(prefix) && is_safe_name(clave))
            .then(|| self.grouped_data_dir().join(prefix).join(format!("{}.json", clave)))
    }

    /// 目录文件 `catalogos/<ref>.json`
    pub fn catalog_file(&self, catalog_ref: &str) -> Option<PathBuf> {
        is_safe_name(catalog_ref).then(|| self.catalogs_dir().join(format!("{}.json", catalog_ref)))
    }
}

/// 统一文件名：没有 `.json` 后缀时补上
pub fn normalize_file_name(name: &str) -> String {
    let name = name.trim();
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    }
}

/// 分组前缀：以 `G` 开头且包含 `_` 的文件名取第一个 `_` 之前的部分
///
/// `G001_01.json` → `G001`
pub fn group_prefix(file_name: &str) -> Option<&str> {
    if !file_name.starts_with('G') {
        return None;
    }
    file_name.split_once('_').map(|(prefix, _)| prefix)
}

/// 名称只能作为单个路径片段使用
///
/// 不能为空，不能以 `.` 开头，不能包含 `..`、路径分隔符或 NUL。其它字符都允许。
pub fn is_safe_name(name: &str) -> bool {
    !name.trim().is_empty()
        && !name.starts_with('.')
        && !name.contains("..")
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_file_name() {
        assert_eq!(normalize_file_name("Generales_01"), "Generales_01.json");
        assert_eq!(normalize_file_name("Generales_01.json"), "Generales_01.json");
    }

    #[test]
    fn test_group_prefix() {
        assert_eq!(group_prefix("G001_01.json"), Some("G001"));
        assert_eq!(group_prefix("Generales_01.json"), Some("Generales"));
        assert_eq!(group_prefix("Domicilio_01.json"), None);
        assert_eq!(group_prefix("G001.json"), None);
    }

    #[test]
    fn test_safe_names() {
        assert!(is_safe_name("Situación_Económica_01.json"));
        assert!(is_safe_name("acme corp"));
        assert!(is_safe_name("Datos (v2).json"));
        assert!(is_safe_name("Hijos & Hijas, O'Brien"));
        assert!(!is_safe_name("../secreto"));
        assert!(!is_safe_name("a/b"));
        assert!(!is_safe_name("a\\b"));
        assert!(!is_safe_name("a\0b"));
        assert!(!is_safe_name(".oculto"));
        assert!(!is_safe_name(""));
    }

    #[test]
    fn test_tenant_paths() {
        let layout = DataLayout::new("/datos", "/recursos");
        assert_eq!(
            layout.sections_dir_for(Some("acme")),
            Some(PathBuf::from("/datos/empresas/acme/secciones"))
        );
        assert_eq!(layout.sections_dir_for(None), Some(PathBuf::from("/datos/secciones")));
        assert_eq!(layout.sections_dir_for(Some("../x")), None);
        assert!(RESERVED_SECTION_FILES.contains("secciones.json"));
    }
}
