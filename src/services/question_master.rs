//! 题目定义总管 - 业务能力层
//!
//! 按分区文件名查找题目定义，合并分组字段，并缓存结果。
//!
//! 查找顺序（找到即停止并写入缓存）：
//! 1. 缓存（依赖文件未变化时）
//! 2. 企业分区目录；没有企业时为全局分区目录
//! 3. 指定了企业但企业目录中没有时，回退到全局分区目录
//! 4. `grupos/`，题目文件优先从 `grupos/datos/<前缀>/` 读取
//! 5. `datos/` 中直接包含 `datos` 列表的平铺文档
//! 6. `grupos/datos/` 的每个子目录中同名的平铺文档

use crate::infrastructure::{
    group_prefix, is_safe_name, normalize_file_name, DataLayout, DependencySet,
    RESERVED_SECTION_FILES,
};
use crate::models::{
    list_json_files, list_subdirectories, read_json_file, GroupItem, QuestionDefinition,
    SectionDocument, SectionFile,
};
use crate::utils::logging::{log_fields_loaded, truncate_text};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, error, info, warn};

/// 找到分区的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStep {
    /// 企业分区目录，或没有企业时的全局分区目录
    Sections,
    /// 企业查找回退到全局分区目录
    GlobalFallback,
    /// `grupos/`
    Groups,
    /// `datos/` 平铺文档
    FlatDatos,
    /// `grupos/datos/<子目录>/` 平铺文档
    GroupedData,
}

impl fmt::Display for LookupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStep::Sections => "secciones",
            LookupStep::GlobalFallback => "secciones (回退)",
            LookupStep::Groups => "grupos",
            LookupStep::FlatDatos => "datos",
            LookupStep::GroupedData => "grupos/datos",
        };
        f.write_str(name)
    }
}

/// 缓存键：企业 + 统一后的文件名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    tenant: Option<String>,
    file_name: String,
}

struct CacheEntry {
    document: SectionDocument,
    source: PathBuf,
    step: LookupStep,
    dependencies: DependencySet,
}

/// 一次成功的磁盘查找
struct Resolved {
    document: SectionDocument,
    source: PathBuf,
    step: LookupStep,
}

/// 题目定义总管
///
/// 职责：
/// - 按分区名查找并合并题目定义
/// - 缓存查找结果，读取时检查依赖文件是否变化
/// - 启动时汇总全部分区的题目字段
///
/// 每个进程创建一个实例，通过引用共享给请求处理函数。
pub struct QuestionMaster {
    layout: DataLayout,
    cache: RwLock<HashMap<CacheKey, CacheEntry>>,
    all_fields: Vec<QuestionDefinition>,
}

impl QuestionMaster {
    /// 创建实例并汇总 `tenant`（或全局）分区目录中的全部题目
    pub fn new(layout: DataLayout, tenant: Option<&str>) -> Self {
        let mut master = Self {
            layout,
            cache: RwLock::new(HashMap::new()),
            all_fields: Vec::new(),
        };
        master.all_fields = master.collect_all_fields(tenant);
        master
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// 获取完整分区（题目列表 + 引导语），找不到时返回 `None`
    pub fn get_section(&self, name: &str, tenant: Option<&str>) -> Option<SectionDocument> {
        let file_name = normalize_file_name(name);
        if !is_safe_name(&file_name) {
            warn!("⚠️ 分区名无效，忽略: '{}'", name);
            return None;
        }

        let tenant = tenant.map(str::trim).filter(|t| !t.is_empty());
        let key = CacheKey {
            tenant: tenant.map(str::to_string),
            file_name,
        };

        if let Some(document) = self.cached(&key) {
            return Some(document);
        }

        let mut dependencies = DependencySet::new();
        let resolved = self.resolve(&key.file_name, tenant, &mut dependencies)?;

        info!(
            "✓ 分区 '{}' 从 {} 加载，共 {} 个题目 ({})",
            key.file_name,
            resolved.step,
            resolved.document.datos.len(),
            resolved.source.display()
        );
        if let Some(intro) = &resolved.document.frase_introduccion {
            debug!("分区 '{}' 引导语: {}", key.file_name, truncate_text(&intro.to_string(), 80));
        }

        let document = resolved.document.clone();
        self.write_cache().insert(
            key,
            CacheEntry {
                document: resolved.document,
                source: resolved.source,
                step: resolved.step,
                dependencies,
            },
        );

        Some(document)
    }

    /// 只返回题目列表，找不到时返回空列表
    pub fn get_questions(&self, name: &str, tenant: Option<&str>) -> Vec<QuestionDefinition> {
        match self.get_section(name, tenant) {
            Some(document) => document.datos,
            None => {
                warn!(
                    "⚠️ 在任何已知位置都找不到分区 '{}' (企业: {})",
                    normalize_file_name(name),
                    tenant.unwrap_or("-")
                );
                Vec::new()
            }
        }
    }

    /// 启动时汇总的全部题目字段，每个字段带有 `archivo_origen`
    pub fn all_fields(&self) -> &[QuestionDefinition] {
        &self.all_fields
    }

    /// 当前缓存的分区数量
    pub fn cached_sections(&self) -> usize {
        self.read_cache().len()
    }

    /// 清空缓存
    pub fn invalidate_all(&self) {
        let mut cache = self.write_cache();
        info!("🧹 清空分区缓存 ({} 项)", cache.len());
        cache.clear();
    }

    // ========== 缓存 ==========

    fn read_cache(&self) -> std::sync::RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 读取缓存；依赖文件有变化时删除缓存项并返回 `None`
    fn cached(&self, key: &CacheKey) -> Option<SectionDocument> {
        {
            let cache = self.read_cache();
            let entry = cache.get(key)?;
            match entry.dependencies.first_changed() {
                None => {
                    debug!(
                        "分区 '{}' 命中缓存 (来源: {}, 引导语: {})",
                        key.file_name,
                        entry.step,
                        entry.document.frase_introduccion.is_some()
                    );
                    return Some(entry.document.clone());
                }
                Some(changed) => {
                    info!(
                        "🔄 分区 '{}' 的依赖文件已变化 ({})，重新加载 (原来源: {})",
                        key.file_name,
                        changed.display(),
                        entry.source.display()
                    );
                }
            }
        }

        self.write_cache().remove(key);
        None
    }

    // ========== 磁盘查找 ==========

    fn resolve(
        &self,
        file_name: &str,
        tenant: Option<&str>,
        deps: &mut DependencySet,
    ) -> Option<Resolved> {
        let primary_dir = self.layout.sections_dir_for(tenant);
        if primary_dir.is_none() {
            warn!("⚠️ 企业名无效，跳过企业目录: '{}'", tenant.unwrap_or_default());
        }

        if let Some(dir) = &primary_dir {
            let path = dir.join(file_name);
            if let Some(document) = self.load_grouped_section(&path, None, deps) {
                return Some(Resolved { document, source: path, step: LookupStep::Sections });
            }
        }

        let global_dir = self.layout.sections_dir();
        if tenant.is_some() && primary_dir.as_ref() != Some(&global_dir) {
            let path = global_dir.join(file_name);
            if let Some(document) = self.load_grouped_section(&path, None, deps) {
                return Some(Resolved { document, source: path, step: LookupStep::GlobalFallback });
            }
        }

        let path = self.layout.groups_dir().join(file_name);
        if let Some(document) = self.load_grouped_section(&path, group_prefix(file_name), deps) {
            return Some(Resolved { document, source: path, step: LookupStep::Groups });
        }

        let path = self.layout.datos_dir().join(file_name);
        if let Some(document) = self.load_flat_document(&path, deps) {
            return Some(Resolved { document, source: path, step: LookupStep::FlatDatos });
        }

        for subdir in list_subdirectories(&self.layout.grouped_data_dir()) {
            let path = subdir.join(file_name);
            if let Some(document) = self.load_flat_document(&path, deps) {
                return Some(Resolved { document, source: path, step: LookupStep::GroupedData });
            }
        }

        None
    }

    /// 读取分组形式的分区文件，逐项加载题目文件并合并分组字段
    fn load_grouped_section(
        &self,
        path: &Path,
        prefix: Option<&str>,
        deps: &mut DependencySet,
    ) -> Option<SectionDocument> {
        deps.record(path);
        let value = read_or_log(path)?;

        let Some(file) = SectionFile::from_value(&value) else {
            warn!("⚠️ 分区文件既不是列表也不是对象: {}", path.display());
            return None;
        };
        let Some(items) = file.group_items() else {
            debug!("分区文件中没有 grupo_datos: {}", path.display());
            return None;
        };

        let datos: Vec<QuestionDefinition> = items
            .iter()
            .filter_map(|item| self.build_question(item, prefix, deps))
            .collect();
        if datos.is_empty() {
            debug!("分区文件没有可用题目: {}", path.display());
            return None;
        }

        let mut document = SectionDocument::new(datos);
        if let Some((key, intro)) = file.intro_phrase() {
            debug!("在 '{}' 的 '{}' 中找到引导语", path.display(), key);
            document.frase_introduccion = Some(intro.clone());
        }
        Some(document)
    }

    /// 由分组条目构造题目：有题目文件时合并，否则直接使用条目字段
    fn build_question(
        &self,
        item: &GroupItem,
        prefix: Option<&str>,
        deps: &mut DependencySet,
    ) -> Option<QuestionDefinition> {
        let clave = item.clave()?;

        match (self.load_individual_question(&clave, prefix, deps), item.entry()) {
            (Some(mut question), Some(entry)) => {
                question.merge_group_fields(entry);
                debug!(
                    "题目 '{}' 合并分组字段: {:?}",
                    clave,
                    entry.override_fields().collect::<Vec<_>>()
                );
                Some(question)
            }
            (Some(question), None) => Some(question),
            (None, Some(entry)) => {
                debug!("题目 '{}' 没有独立文件，使用分组条目的定义", clave);
                Some(QuestionDefinition::from(entry.clone()))
            }
            (None, None) => {
                warn!("⚠️ 题目 '{}' 没有独立文件，跳过", clave);
                None
            }
        }
    }

    /// 优先读取 `grupos/datos/<前缀>/<clave>.json`，再读取 `datos/<clave>.json`
    fn load_individual_question(
        &self,
        clave: &str,
        prefix: Option<&str>,
        deps: &mut DependencySet,
    ) -> Option<QuestionDefinition> {
        if let Some(path) = prefix.and_then(|p| self.layout.group_question_file(p, clave)) {
            deps.record(&path);
            if let Some(question) = read_question(&path) {
                return Some(question);
            }
        }

        let Some(path) = self.layout.question_file(clave) else {
            warn!("⚠️ 题目键无效，忽略: '{}'", clave);
            return None;
        };
        deps.record(&path);
        read_question(&path)
    }

    /// 平铺文档：文件本身就是 `{"datos": [...]}`
    fn load_flat_document(&self, path: &Path, deps: &mut DependencySet) -> Option<SectionDocument> {
        deps.record(path);
        let value = read_or_log(path)?;
        match SectionDocument::from_flat_value(value, path) {
            Ok(Some(document)) => Some(document),
            Ok(None) => {
                debug!("不是平铺题目文档: {}", path.display());
                None
            }
            Err(e) => {
                warn!("⚠️ 平铺题目文档格式无效: {}", e);
                None
            }
        }
    }

    // ========== 汇总 ==========

    fn collect_all_fields(&self, tenant: Option<&str>) -> Vec<QuestionDefinition> {
        info!("📚 正在汇总全部面试分区的题目定义...");

        let mut section_dirs: Vec<PathBuf> = Vec::new();
        if let Some(dir) = tenant.and_then(|t| self.layout.tenant_sections_dir(t)) {
            section_dirs.push(dir);
        }
        section_dirs.push(self.layout.sections_dir());

        for dir in &section_dirs {
            let files = section_files(dir);
            if files.is_empty() {
                continue;
            }
            // 分区目录中也可能放着平铺文档
            return self.collect_from_files(&files, |master, file_name, path| {
                master
                    .get_section(file_name, tenant)
                    .or_else(|| master.load_flat_document(path, &mut DependencySet::new()))
            });
        }

        // 旧版资源目录只接受平铺文档
        let files = section_files(self.layout.resources_dir());
        self.collect_from_files(&files, |master, _, path| {
            master.load_flat_document(path, &mut DependencySet::new())
        })
    }

    fn collect_from_files<F>(&self, files: &[PathBuf], load: F) -> Vec<QuestionDefinition>
    where
        F: Fn(&Self, &str, &Path) -> Option<SectionDocument>,
    {
        let mut fields = Vec::new();
        let mut loaded_sections = 0;

        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(document) = load(self, file_name, path.as_path()) else {
                continue;
            };

            loaded_sections += 1;
            debug!(" -> '{}' 已加载", file_name);
            fields.extend(document.datos.into_iter().map(|mut question| {
                question.set_origin(file_name);
                question
            }));
        }

        log_fields_loaded(loaded_sections, fields.len());
        fields
    }
}

/// 目录中的分区文件（跳过保留文件），目录不存在时返回空列表
fn section_files(dir: &Path) -> Vec<PathBuf> {
    match list_json_files(dir) {
        Ok(files) => files
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| !RESERVED_SECTION_FILES.contains(name))
            })
            .collect(),
        Err(e) => {
            debug!("跳过目录: {}", e);
            Vec::new()
        }
    }
}

/// 读取 JSON；文件不存在返回 `None`，读取或解析失败记录日志后返回 `None`
fn read_or_log(path: &Path) -> Option<serde_json::Value> {
    match read_json_file(path) {
        Ok(value) => value,
        Err(e) => {
            error!("❌ 无法加载 {}: {}", path.display(), e);
            None
        }
    }
}

/// 单个题目文件必须是非空对象
fn read_question(path: &Path) -> Option<QuestionDefinition> {
    match read_or_log(path)? {
        serde_json::Value::Object(fields) if !fields.is_empty() => {
            Some(QuestionDefinition::from_map(fields))
        }
        _ => {
            warn!("⚠️ 题目文件不是有效对象: {}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;

    fn write(root: &Path, rel: &str, value: Value) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    }

    fn master(root: &Path) -> QuestionMaster {
        QuestionMaster::new(DataLayout::new(root, root.join("resources")), None)
    }

    #[test]
    fn test_grouped_list_merges_in_entry_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/101.json", json!({"clave": "101", "nombre": {"ESP": "Edad"}, "validacion_input": "TEXTO"}));
        write(root, "datos/102.json", json!({"clave": "102", "nombre": {"ESP": "Sexo"}, "tipo": "CATÁLOGO"}));
        write(root, "secciones/Generales_01.json", json!([
            {"clave": "102", "catalogo": "SEXO"},
            {"clave": "101", "validacion_input": "NUMERICO", "catalogo": "C1", "nombre": "ignorado"}
        ]));

        let questions = master(root).get_questions("Generales_01", None);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].clave().as_deref(), Some("102"));
        assert_eq!(questions[0].catalogo(), Some("SEXO"));
        assert_eq!(questions[1].validacion_input(), Some("NUMERICO"));
        assert_eq!(questions[1].catalogo(), Some("C1"));
        assert_eq!(questions[1].nombre(), Some(&json!({"ESP": "Edad"})));
    }

    #[test]
    fn test_groups_dir_prefers_group_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "grupos/datos/G001/500.json", json!({"clave": "500", "nombre": {"ESP": "Del grupo"}}));
        write(root, "datos/500.json", json!({"clave": "500", "nombre": {"ESP": "Plano"}}));
        write(root, "datos/501.json", json!({"clave": "501", "nombre": {"ESP": "Solo plano"}}));
        write(root, "grupos/G001_01.json", json!({"G001_01": {"grupo_datos": ["500", "501"]}}));

        let master = master(root);
        let document = master.get_section("G001_01.json", None).unwrap();
        let names: Vec<&Value> = document.datos.iter().filter_map(|q| q.nombre()).collect();
        assert_eq!(names, vec![&json!({"ESP": "Del grupo"}), &json!({"ESP": "Solo plano"})]);
    }

    #[test]
    fn test_flat_and_grouped_data_documents() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/Plano.json", json!({"datos": [{"clave": "1"}]}));
        write(root, "grupos/datos/G009/Hijos.json", json!({"datos": [{"clave": "2"}, {"clave": "3"}]}));

        let master = master(root);
        assert_eq!(master.get_questions("Plano", None).len(), 1);
        assert_eq!(master.get_questions("Hijos", None).len(), 2);
        assert!(master.get_questions("NoExiste", None).is_empty());
        assert_eq!(master.cached_sections(), 2);
    }

    #[test]
    fn test_malformed_section_falls_through_to_next_location() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("secciones")).unwrap();
        fs::write(root.join("secciones/Roto.json"), "{ roto").unwrap();
        write(root, "datos/Roto.json", json!({"datos": [{"clave": "7"}]}));

        let questions = master(root).get_questions("Roto", None);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn test_cache_reloads_when_intro_phrase_is_added() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/301.json", json!({"clave": "301", "nombre": {"ESP": "Calle"}}));
        write(root, "secciones/Domicilio_01.json", json!({"Domicilio_01": {"grupo_datos": [{"clave": "301"}]}}));

        let master = master(root);
        assert!(master.get_section("Domicilio_01", None).unwrap().frase_introduccion.is_none());

        write(root, "secciones/Domicilio_01.json", json!({"Domicilio_01": {
            "frase_introduccion": {"ESP": "Hablemos de tu domicilio"},
            "grupo_datos": [{"clave": "301"}]
        }}));

        let document = master.get_section("Domicilio_01", None).unwrap();
        assert_eq!(document.frase_introduccion, Some(json!({"ESP": "Hablemos de tu domicilio"})));
    }

    #[test]
    fn test_cache_reloads_when_question_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/301.json", json!({"clave": "301", "nombre": {"ESP": "Calle"}}));
        write(root, "secciones/Domicilio_01.json", json!([{"clave": "301"}]));

        let master = master(root);
        assert_eq!(master.get_questions("Domicilio_01", None)[0].tipo(), None);

        write(root, "datos/301.json", json!({"clave": "301", "nombre": {"ESP": "Calle"}, "tipo": "TEXTO"}));
        assert_eq!(master.get_questions("Domicilio_01", None)[0].tipo(), Some("TEXTO"));
    }

    #[test]
    fn test_returned_questions_do_not_alias_cache() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/Plano.json", json!({"datos": [{"clave": "1", "nombre": {"ESP": "Uno"}}]}));

        let master = master(root);
        let mut questions = master.get_questions("Plano", None);
        questions[0].localize_name("ESP");

        let again = master.get_questions("Plano", None);
        assert_eq!(again[0].nombre(), Some(&json!({"ESP": "Uno"})));
    }

    #[test]
    fn test_tenant_copy_is_isolated_from_global_cache() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "secciones/S.json", json!([{"clave": "1", "nombre": "global"}]));
        write(root, "empresas/acme/secciones/S.json", json!([{"clave": "1", "nombre": "acme"}]));

        let master = master(root);
        assert_eq!(master.get_questions("S", Some("acme"))[0].nombre(), Some(&json!("acme")));
        assert_eq!(master.get_questions("S", None)[0].nombre(), Some(&json!("global")));
        assert_eq!(master.get_questions("S", Some("otra"))[0].nombre(), Some(&json!("global")));
    }

    #[test]
    fn test_invalid_names_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let master = master(dir.path());
        assert!(master.get_section("../../etc/passwd", None).is_none());
        assert!(master.get_questions("S", Some("../x")).is_empty());
    }

    #[test]
    fn test_all_fields_tagged_with_origin() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "secciones/A_01.json", json!([{"clave": "1"}, {"clave": "2"}]));
        write(root, "secciones/B_01.json", json!([{"clave": "3"}]));
        write(root, "secciones/secciones.json", json!([{"clave": "no"}]));

        let master = master(root);
        let origins: Vec<&str> = master.all_fields().iter().filter_map(|q| q.archivo_origen()).collect();
        assert_eq!(origins, vec!["A_01.json", "A_01.json", "B_01.json"]);
        // 汇总时已写入缓存
        assert_eq!(master.cached_sections(), 2);
    }

    #[test]
    fn test_cache_reloads_when_group_entry_gains_override() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/101.json", json!({"clave": "101", "nombre": {"ESP": "Edad"}, "validacion_input": "TEXTO"}));
        write(root, "secciones/S.json", json!([{"clave": "101"}]));

        let master = master(root);
        assert_eq!(master.get_questions("S", None)[0].validacion_input(), Some("TEXTO"));

        write(root, "secciones/S.json", json!([{"clave": "101", "validacion_input": "NUMERICO"}]));
        assert_eq!(master.get_questions("S", None)[0].validacion_input(), Some("NUMERICO"));
    }

    #[test]
    fn test_group_entry_without_question_file_is_returned_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let entry = json!({
            "clave": "900",
            "nombre": {"ESP": "Solo en el grupo"},
            "tipo": "TEXTO",
            "validacion_input": "NUMERICO"
        });
        write(root, "secciones/Solo_01.json", json!([entry.clone()]));

        let questions = master(root).get_questions("Solo_01", None);
        assert_eq!(questions.len(), 1);
        assert_eq!(serde_json::to_value(&questions[0]).unwrap(), entry);
    }

    #[test]
    fn test_all_fields_includes_flat_documents_in_sections_dir() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "secciones/Legado.json", json!({"datos": [{"clave": "1"}, {"clave": "2"}]}));

        let master = master(root);
        assert_eq!(master.all_fields().len(), 2);
        assert!(master.all_fields().iter().all(|q| q.archivo_origen() == Some("Legado.json")));
    }

    #[test]
    fn test_names_with_punctuation_are_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/Datos (v2).json", json!({"datos": [{"clave": "1"}]}));

        assert_eq!(master(root).get_questions("Datos (v2)", None).len(), 1);
    }

    #[test]
    fn test_flat_document_with_scalar_items_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "datos/Roto.json", json!({"datos": [{"clave": "1"}, 7]}));

        assert!(master(root).get_questions("Roto", None).is_empty());
    }

    #[test]
    fn test_all_fields_falls_back_to_resources() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "resources/Legado.json", json!({"datos": [{"clave": "L1"}]}));
        write(root, "resources/config_entrevista.json", json!({"datos": [{"clave": "no"}]}));

        let master = master(root);
        assert_eq!(master.all_fields().len(), 1);
        assert_eq!(master.all_fields()[0].archivo_origen(), Some("Legado.json"));
    }
}
