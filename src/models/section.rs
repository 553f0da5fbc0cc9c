use super::question::{GroupItem, QuestionDefinition};
use crate::error::FileError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// 分区文件中的嵌套条目，例如 `{"Domicilio_01": {"grupo_datos": [...]}}` 的值部分
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionFileEntry {
    pub grupo_datos: Option<Vec<GroupItem>>,
    pub frase_introduccion: Option<Value>,
    pub nombre_corto: Option<Value>,
}

impl SectionFileEntry {
    fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        Some(Self {
            grupo_datos: map
                .get("grupo_datos")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(GroupItem::from_value).collect()),
            frase_introduccion: map.get("frase_introduccion").cloned(),
            nombre_corto: map.get("nombre_corto").cloned(),
        })
    }
}

/// 磁盘上的分区文件
///
/// 两种写法：直接是分组条目列表，或者是 `键 → 条目` 的对象。
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFile {
    Grouped(Vec<GroupItem>),
    Keyed(Vec<(String, SectionFileEntry)>),
}

impl SectionFile {
    /// 从 JSON 值解析；对象中不是对象的值会被忽略
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(SectionFile::Grouped(
                items.iter().filter_map(GroupItem::from_value).collect(),
            )),
            Value::Object(map) => Some(SectionFile::Keyed(
                map.iter()
                    .filter_map(|(key, value)| {
                        SectionFileEntry::from_value(value).map(|entry| (key.clone(), entry))
                    })
                    .collect(),
            )),
            _ => None,
        }
    }

    /// 第一个带 `grupo_datos` 的条目中的列表
    pub fn group_items(&self) -> Option<&[GroupItem]> {
        match self {
            SectionFile::Grouped(items) => Some(items.as_slice()),
            SectionFile::Keyed(entries) => entries
                .iter()
                .find_map(|(_, entry)| entry.grupo_datos.as_deref()),
        }
    }

    /// 第一个带 `frase_introduccion` 的条目中的引导语
    pub fn intro_phrase(&self) -> Option<(&str, &Value)> {
        self.keyed_entries()
            .find_map(|(key, entry)| entry.frase_introduccion.as_ref().map(|v| (key.as_str(), v)))
    }

    /// 第一个带 `nombre_corto` 的条目中的简称
    pub fn short_name(&self) -> Option<&Value> {
        self.keyed_entries()
            .find_map(|(_, entry)| entry.nombre_corto.as_ref())
    }

    fn keyed_entries(&self) -> impl Iterator<Item = &(String, SectionFileEntry)> {
        let entries: &[(String, SectionFileEntry)] = match self {
            SectionFile::Keyed(entries) => entries,
            SectionFile::Grouped(_) => &[],
        };
        entries.iter()
    }
}

/// 一个面试分区：有序题目列表 + 可选的多语言引导语
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub datos: Vec<QuestionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frase_introduccion: Option<Value>,
}

impl SectionDocument {
    pub fn new(datos: Vec<QuestionDefinition>) -> Self {
        Self {
            datos,
            frase_introduccion: None,
        }
    }

    /// 平铺文档必须是带 `datos` 列表的对象
    ///
    /// 没有 `datos` 列表时返回 `Ok(None)`；列表中有非对象元素时返回 `InvalidShape`。
    pub fn from_flat_value(value: Value, path: &Path) -> Result<Option<Self>, FileError> {
        let has_datos = value
            .as_object()
            .map(|map| map.get("datos").is_some_and(Value::is_array))
            .unwrap_or(false);
        if !has_datos {
            return Ok(None);
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| FileError::InvalidShape {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.datos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyed_file_exposes_groups_intro_and_short_name() {
        let raw = json!({
            "version": 2,
            "Domicilio_01": {
                "nombre_corto": {"ESP": "Domicilio"},
                "frase_introduccion": {"ESP": "Hablemos de tu casa"},
                "grupo_datos": [{"clave": "301"}, "302"]
            }
        });
        let file = SectionFile::from_value(&raw).unwrap();

        let items = file.group_items().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].clave().as_deref(), Some("302"));
        assert_eq!(file.intro_phrase().map(|(k, _)| k), Some("Domicilio_01"));
        assert_eq!(file.short_name(), Some(&json!({"ESP": "Domicilio"})));
    }

    #[test]
    fn test_grouped_list_has_no_intro() {
        let file = SectionFile::from_value(&json!([{"clave": "1"}])).unwrap();
        assert!(file.group_items().is_some());
        assert!(file.intro_phrase().is_none());
        assert!(SectionFile::from_value(&json!("texto")).is_none());
    }

    #[test]
    fn test_flat_document_requires_datos_list() {
        let path = Path::new("datos/Plano.json");
        let parse = |value| SectionDocument::from_flat_value(value, path);

        assert!(parse(json!({"datos": [{"clave": "1"}]})).unwrap().is_some());
        assert!(parse(json!({"clave": "1"})).unwrap().is_none());
        assert!(parse(json!([1, 2])).unwrap().is_none());
    }

    #[test]
    fn test_flat_document_with_scalar_items_is_invalid_shape() {
        let raw = json!({"datos": [{"clave": "1"}, 7]});
        let err = SectionDocument::from_flat_value(raw, Path::new("datos/Roto.json")).unwrap_err();
        assert!(matches!(err, FileError::InvalidShape { ref path, .. } if path == "datos/Roto.json"));
    }
}
