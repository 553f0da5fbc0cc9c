use serde::{Deserialize, Serialize};

/// 候选人（评估）记录，只保留表单需要的字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// 评估 ID
    #[serde(rename = "_id")]
    pub id: String,
    /// 面试脚本中的分区列表（有序）
    #[serde(default)]
    pub guion_secciones: Vec<ScriptSection>,
    /// 管理该评估的企业
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa_gestion: Option<String>,
}

/// 面试脚本中的一个分区
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSection {
    #[serde(default)]
    pub tipo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archivo: Option<String>,
    #[serde(default = "default_naturaleza")]
    pub naturaleza: String,
}

fn default_naturaleza() -> String {
    "dato_plano".to_string()
}

impl ScriptSection {
    /// 只有 `entrevista` 类型且带文件名的分区会出现在表单中
    pub fn interview_file(&self) -> Option<&str> {
        if self.tipo != "entrevista" {
            return None;
        }
        self.archivo.as_deref().filter(|a| !a.trim().is_empty())
    }
}
