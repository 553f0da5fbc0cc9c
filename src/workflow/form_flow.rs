//! 表单数据流程
//!
//! 定义"一个候选人的表单"如何组装：脚本分区 → 题目 → 本地化 → 目录展开

use crate::models::question::CATALOG_TYPE;
use crate::models::{Candidate, QuestionDefinition};
use crate::services::{CatalogService, QuestionMaster, SectionLoader};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// 返回给前端的一个分区
#[derive(Debug, Clone, Serialize)]
pub struct FormSection {
    /// 脚本中的文件名（原样）
    pub key: String,
    /// 本地化后的分区名称
    pub nombre: String,
    pub naturaleza: String,
    pub preguntas: Vec<QuestionDefinition>,
}

/// 表单数据流程
///
/// 职责：
/// - 按候选人脚本的顺序取出面试分区
/// - 把题目名称换成候选人的语言
/// - 把目录引用展开成选项列表
pub struct FormFlow {
    master: Arc<QuestionMaster>,
    sections: SectionLoader,
    catalogs: CatalogService,
}

impl FormFlow {
    pub fn new(master: Arc<QuestionMaster>) -> Self {
        let layout = master.layout().clone();
        Self {
            master,
            sections: SectionLoader::new(layout.clone()),
            catalogs: CatalogService::new(layout),
        }
    }

    pub fn master(&self) -> &QuestionMaster {
        &self.master
    }

    /// 组装候选人的全部面试分区
    pub fn build_sections(&self, candidate: &Candidate, language: &str) -> Vec<FormSection> {
        let tenant = candidate.empresa_gestion.as_deref();

        candidate
            .guion_secciones
            .iter()
            .filter_map(|section| {
                let file = section.interview_file()?;
                Some(self.build_section(file, &section.naturaleza, tenant, language))
            })
            .collect()
    }

    fn build_section(&self, file: &str, naturaleza: &str, tenant: Option<&str>, language: &str) -> FormSection {
        info!(
            "[表单] 加载分区 '{}' (企业: {}, 语言: {})",
            file,
            tenant.unwrap_or("-"),
            language
        );

        let document = self.sections.load_section_json(file, tenant);
        let nombre = self
            .sections
            .section_display_name(file, document.as_ref(), language);

        let preguntas: Vec<QuestionDefinition> = self
            .master
            .get_questions(file, tenant)
            .into_iter()
            .map(|question| self.prepare_question(question, language))
            .collect();

        debug!("[表单] 分区 '{}' → '{}'，{} 个题目", file, nombre, preguntas.len());

        FormSection {
            key: file.to_string(),
            nombre,
            naturaleza: naturaleza.to_string(),
            preguntas,
        }
    }

    /// 本地化名称，目录类型题目展开选项
    pub fn prepare_question(&self, mut question: QuestionDefinition, language: &str) -> QuestionDefinition {
        question.localize_name(language);

        if question.validacion_input() == Some("NUMERICO") {
            debug!("[表单] 数字字段: {}", question.clave().unwrap_or_default());
        }

        if question.tipo() == Some(CATALOG_TYPE) {
            if let Some(catalog_ref) = question.catalogo().filter(|r| !r.is_empty()).map(str::to_string) {
                let options = self.catalogs.resolve_options(&catalog_ref, language);
                question.insert(
                    "catalogo",
                    Value::Array(options.into_iter().map(Value::String).collect()),
                );
            }
        }

        question
    }
}
