//! 多语言文本工具
//!
//! 多语言对象的格式为 `{"ESP": "...", "ENG": "..."}`，键为大写语言代码

use serde_json::Value;

/// 回退语言
pub const FALLBACK_LANGUAGE: &str = "ESP";

/// 按语言取出文本
///
/// 顺序：请求的语言 → `ESP` → 第一个可用值 → 空字符串。
/// 纯字符串原样返回，其它类型返回空字符串。
pub fn resolve_text(value: &Value, language: &str) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(map) => {
            let requested = language.to_uppercase();
            [requested.as_str(), FALLBACK_LANGUAGE]
                .iter()
                .filter_map(|code| map.get(*code))
                .find_map(non_empty_str)
                .or_else(|| map.values().next().and_then(non_empty_str))
                .unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// 目录选项取值：与 `resolve_text` 相同，但数字、布尔值会转成文本
pub fn resolve_option(value: &Value, language: &str) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => resolve_text(other, language),
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
