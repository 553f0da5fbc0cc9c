//! 候选人状态存储
//!
//! 表单进度、已填写的答案和分组记录。真实部署中由外部文档库提供，
//! 这里定义接口并提供内存实现。

use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

pub type JsonMap = Map<String, Value>;

/// 分组记录的主键字段
pub const RECORD_ID_FIELD: &str = "registro_id";

/// 候选人状态存储接口
pub trait StateStore: Send + Sync {
    /// 读取候选人状态（语言、是否访问过表单等），不存在时返回空对象
    fn load_state(&self, evaluation_id: &str) -> AppResult<JsonMap>;

    /// 覆盖保存候选人状态
    fn save_state(&self, evaluation_id: &str, state: JsonMap) -> AppResult<()>;

    /// 普通分区的答案：题目键 → 值
    fn load_interview_data(&self, evaluation_id: &str) -> AppResult<JsonMap>;

    /// 保存一个普通分区答案
    fn save_interview_value(&self, evaluation_id: &str, key: &str, value: Value) -> AppResult<()>;

    /// 分组分区的记录：分组键 → 记录列表
    fn load_group_data(&self, evaluation_id: &str) -> AppResult<JsonMap>;

    /// 保存一条分组记录，返回记录的 `registro_id`
    fn save_group_item(&self, evaluation_id: &str, group_key: &str, item: JsonMap) -> AppResult<String>;

    /// 删除一条分组记录，返回是否删除了记录
    fn delete_group_item(&self, evaluation_id: &str, group_key: &str, record_id: &str) -> AppResult<bool>;
}

#[derive(Debug, Default, Clone)]
struct EvaluationRecord {
    state: JsonMap,
    interview: JsonMap,
    groups: HashMap<String, Vec<JsonMap>>,
}

/// 内存状态存储
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    records: RwLock<HashMap<String, EvaluationRecord>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, evaluation_id: &str, f: impl FnOnce(Option<&EvaluationRecord>) -> T) -> AppResult<T> {
        let records = self
            .records
            .read()
            .map_err(|e| AppError::Store(format!("读锁失败: {}", e)))?;
        Ok(f(records.get(evaluation_id)))
    }

    fn write<T>(&self, evaluation_id: &str, f: impl FnOnce(&mut EvaluationRecord) -> T) -> AppResult<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AppError::Store(format!("写锁失败: {}", e)))?;
        Ok(f(records.entry(evaluation_id.to_string()).or_default()))
    }
}

/// 记录 ID 可能是字符串或数字
pub fn record_id_of(item: &JsonMap) -> Option<String> {
    match item.get(RECORD_ID_FIELD)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl StateStore for MemoryStateStore {
    fn load_state(&self, evaluation_id: &str) -> AppResult<JsonMap> {
        self.read(evaluation_id, |r| r.map(|r| r.state.clone()).unwrap_or_default())
    }

    fn save_state(&self, evaluation_id: &str, state: JsonMap) -> AppResult<()> {
        self.write(evaluation_id, |r| r.state = state)
    }

    fn load_interview_data(&self, evaluation_id: &str) -> AppResult<JsonMap> {
        self.read(evaluation_id, |r| r.map(|r| r.interview.clone()).unwrap_or_default())
    }

    fn save_interview_value(&self, evaluation_id: &str, key: &str, value: Value) -> AppResult<()> {
        debug!("[{}] 保存答案 '{}'", evaluation_id, key);
        self.write(evaluation_id, |r| {
            r.interview.insert(key.to_string(), value);
        })
    }

    fn load_group_data(&self, evaluation_id: &str) -> AppResult<JsonMap> {
        self.read(evaluation_id, |r| {
            r.map(|r| {
                r.groups
                    .iter()
                    .map(|(key, items)| {
                        let items = items.iter().cloned().map(Value::Object).collect();
                        (key.clone(), Value::Array(items))
                    })
                    .collect()
            })
            .unwrap_or_default()
        })
    }

    fn save_group_item(&self, evaluation_id: &str, group_key: &str, mut item: JsonMap) -> AppResult<String> {
        let record_id = match record_id_of(&item) {
            Some(id) => id,
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                item.insert(RECORD_ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        debug!("[{}] 保存分组记录 {} / {}", evaluation_id, group_key, record_id);
        self.write(evaluation_id, |r| {
            let items = r.groups.entry(group_key.to_string()).or_default();
            match items.iter_mut().find(|existing| record_id_of(existing).as_deref() == Some(record_id.as_str())) {
                Some(existing) => *existing = item,
                None => items.push(item),
            }
        })?;

        Ok(record_id)
    }

    fn delete_group_item(&self, evaluation_id: &str, group_key: &str, record_id: &str) -> AppResult<bool> {
        self.write(evaluation_id, |r| {
            let Some(items) = r.groups.get_mut(group_key) else {
                return false;
            };
            let before = items.len();
            items.retain(|item| record_id_of(item).as_deref() != Some(record_id));
            before != items.len()
        })
    }
}
