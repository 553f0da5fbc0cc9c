use crate::utils::resolve_option;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 目录文件 `catalogos/<ref>.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// 目录中的一个可选项
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub valor: Value,
}

impl Catalog {
    /// 按语言展开全部选项
    pub fn options(&self, language: &str) -> Vec<String> {
        self.items
            .iter()
            .map(|item| resolve_option(&item.valor, language))
            .collect()
    }
}
