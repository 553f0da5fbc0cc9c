use crate::utils::resolve_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 题目唯一标识字段
pub const KEY_FIELD: &str = "clave";
/// 多语言显示名称字段
pub const NAME_FIELD: &str = "nombre";
/// 题目来源文件字段
pub const ORIGIN_FIELD: &str = "archivo_origen";
/// 目录类型的题目
pub const CATALOG_TYPE: &str = "CATÁLOGO";

/// 题目定义
///
/// 字段集合不固定，保留 JSON 原始顺序。常用字段提供访问方法。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionDefinition(Map<String, Value>);

impl QuestionDefinition {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// 题目键，数字键会转成字符串
    pub fn clave(&self) -> Option<String> {
        self.0.get(KEY_FIELD).and_then(key_to_string)
    }

    pub fn nombre(&self) -> Option<&Value> {
        self.0.get(NAME_FIELD)
    }

    pub fn tipo(&self) -> Option<&str> {
        self.get_str("tipo")
    }

    pub fn validacion_input(&self) -> Option<&str> {
        self.get_str("validacion_input")
    }

    /// 目录引用（只在尚未展开为选项列表时为字符串）
    pub fn catalogo(&self) -> Option<&str> {
        self.get_str("catalogo")
    }

    pub fn archivo_origen(&self) -> Option<&str> {
        self.get_str(ORIGIN_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 用分组条目覆盖字段
    ///
    /// `clave` 和 `nombre` 始终保留题目文件中的值，其余字段以分组条目为准。
    pub fn merge_group_fields(&mut self, entry: &GroupEntry) {
        for (field, value) in entry.fields() {
            if field == KEY_FIELD || field == NAME_FIELD {
                continue;
            }
            self.0.insert(field.clone(), value.clone());
        }
    }

    /// 记录题目来源文件
    pub fn set_origin(&mut self, file_name: &str) {
        self.0
            .insert(ORIGIN_FIELD.to_string(), Value::String(file_name.to_string()));
    }

    /// 把多语言名称替换为指定语言的文本
    pub fn localize_name(&mut self, language: &str) {
        if let Some(name) = self.0.get_mut(NAME_FIELD) {
            *name = Value::String(resolve_text(name, language));
        }
    }
}

impl From<GroupEntry> for QuestionDefinition {
    /// 没有独立题目文件时，直接使用分组条目的全部字段
    fn from(entry: GroupEntry) -> Self {
        Self(entry.0)
    }
}

/// 分区文件 `grupo_datos` 列表中的条目：题目键 + 覆盖字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupEntry(Map<String, Value>);

impl GroupEntry {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn clave(&self) -> Option<String> {
        self.0.get(KEY_FIELD).and_then(key_to_string)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// 除 `clave` 之外的字段名，用于判断合并结果是否完整
    pub fn override_fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys().filter(|k| k.as_str() != KEY_FIELD)
    }
}

/// `grupo_datos` 中的一项：对象条目或只写了题目键
#[derive(Debug, Clone, PartialEq)]
pub enum GroupItem {
    Entry(GroupEntry),
    Ref(String),
}

impl GroupItem {
    /// 从任意 JSON 值解析，无法识别的值返回 `None`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(GroupItem::Entry(GroupEntry::from_map(map.clone()))),
            other => key_to_string(other).map(GroupItem::Ref),
        }
    }

    pub fn clave(&self) -> Option<String> {
        match self {
            GroupItem::Entry(entry) => entry.clave(),
            GroupItem::Ref(key) => Some(key.clone()),
        }
    }

    pub fn entry(&self) -> Option<&GroupEntry> {
        match self {
            GroupItem::Entry(entry) => Some(entry),
            GroupItem::Ref(_) => None,
        }
    }
}

/// 题目键可能写成字符串或数字
pub(crate) fn key_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(value: Value) -> QuestionDefinition {
        serde_json::from_value(value).unwrap()
    }

    fn entry(value: Value) -> GroupEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_merge_keeps_name_and_key_from_question_file() {
        let mut q = question(json!({
            "clave": "101",
            "nombre": {"ESP": "Edad"},
            "validacion_input": "TEXTO"
        }));
        q.merge_group_fields(&entry(json!({
            "clave": "101",
            "nombre": "Otro nombre",
            "validacion_input": "NUMERICO",
            "catalogo": "C1"
        })));

        assert_eq!(q.validacion_input(), Some("NUMERICO"));
        assert_eq!(q.catalogo(), Some("C1"));
        assert_eq!(q.nombre(), Some(&json!({"ESP": "Edad"})));
        assert_eq!(q.clave().as_deref(), Some("101"));
    }

    #[test]
    fn test_group_entry_without_file_is_used_verbatim() {
        let raw = json!({"clave": "900", "nombre": {"ESP": "Solo grupo"}, "tipo": "TEXTO"});
        let q = QuestionDefinition::from(entry(raw.clone()));
        assert_eq!(serde_json::to_value(&q).unwrap(), raw);
    }

    #[test]
    fn test_group_item_accepts_bare_and_numeric_keys() {
        assert_eq!(GroupItem::from_value(&json!("205")), Some(GroupItem::Ref("205".into())));
        assert_eq!(GroupItem::from_value(&json!(205)).and_then(|i| i.clave()), Some("205".into()));
        assert_eq!(GroupItem::from_value(&json!(null)), None);
    }

    #[test]
    fn test_localize_name() {
        let mut q = question(json!({"clave": "1", "nombre": {"ESP": "Edad", "ENG": "Age"}}));
        q.localize_name("ENG");
        assert_eq!(q.nombre(), Some(&json!("Age")));
    }
}
