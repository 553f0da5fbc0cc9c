//! 表单接口
//!
//! 只做请求/响应转换，题目查找交给 `FormFlow`，答案保存交给 `StateStore`

use super::extract::CurrentCandidate;
use super::AppState;
use crate::error::{AppError, AppResult};
use crate::services::state_store::{record_id_of, JsonMap};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

/// 候选人状态中的语言字段
const LANGUAGE_FIELD: &str = "idioma";
/// 候选人状态中的"已访问表单"标记
const VISITED_FIELD: &str = "ha_visitado_formulario";

/// `GET /form/data`：按脚本顺序返回面试分区和已保存的数据
pub async fn get_form_data(
    State(state): State<AppState>,
    CurrentCandidate(candidate): CurrentCandidate,
) -> AppResult<Json<Value>> {
    let evaluation_id = candidate.id.as_str();
    let estado = state.store.load_state(evaluation_id)?;
    let idioma = estado
        .get(LANGUAGE_FIELD)
        .and_then(Value::as_str)
        .filter(|lang| !lang.trim().is_empty())
        .map(|lang| lang.trim().to_uppercase())
        .unwrap_or_else(|| state.default_language.clone());

    let secciones = state.form.build_sections(&candidate, &idioma);
    info!("[{}] 📋 表单包含 {} 个分区 (语言: {})", evaluation_id, secciones.len(), idioma);

    let entrevista = state.store.load_interview_data(evaluation_id)?;
    let grupos = state.store.load_group_data(evaluation_id)?;

    Ok(Json(json!({
        "success": true,
        "secciones": secciones,
        "datos_guardados": {
            "entrevista": entrevista,
            "grupos": grupos,
        }
    })))
}

/// `POST /form/save_section`：保存普通分区的答案
pub async fn save_section(
    State(state): State<AppState>,
    CurrentCandidate(candidate): CurrentCandidate,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let datos = json_object(body)?;

    for (clave, valor) in datos {
        state.store.save_interview_value(&candidate.id, &clave, valor)?;
    }

    Ok(Json(json!({
        "success": true,
        "message": "Sección guardada correctamente."
    })))
}

/// `POST /form/save_group_item/{group_key}`：新增一条分组记录
pub async fn save_group_item(
    State(state): State<AppState>,
    Path(group_key): Path<String>,
    CurrentCandidate(candidate): CurrentCandidate,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let item = json_object(body)?;
    let record_id = state.store.save_group_item(&candidate.id, &group_key, item)?;
    info!("[{}] ✓ 分组 '{}' 保存记录 {}", candidate.id, group_key, record_id);

    Ok(Json(json!({
        "success": true,
        "message": "Registro añadido correctamente.",
        "registro_id": record_id
    })))
}

/// `POST /form/delete_group_item/{group_key}`：按 `registro_id` 删除分组记录
pub async fn delete_group_item(
    State(state): State<AppState>,
    Path(group_key): Path<String>,
    CurrentCandidate(candidate): CurrentCandidate,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let data = json_object(body).unwrap_or_default();
    let Some(record_id) = record_id_of(&data) else {
        return Err(AppError::missing_field("registro_id", "Falta el registro_id."));
    };

    let removed = state.store.delete_group_item(&candidate.id, &group_key, &record_id)?;
    if !removed {
        warn!("[{}] ⚠️ 分组 '{}' 中没有记录 {}", candidate.id, group_key, record_id);
    }

    Ok(Json(json!({
        "success": true,
        "message": "Registro eliminado correctamente."
    })))
}

/// `POST /form/visited`：标记候选人已访问表单
pub async fn mark_visited(
    State(state): State<AppState>,
    CurrentCandidate(candidate): CurrentCandidate,
) -> AppResult<Json<Value>> {
    let mut estado = state.store.load_state(&candidate.id)?;
    estado.insert(VISITED_FIELD.to_string(), Value::Bool(true));
    state.store.save_state(&candidate.id, estado)?;

    Ok(Json(json!({ "success": true })))
}

/// 请求体必须是 JSON 对象
fn json_object(body: Result<Json<Value>, JsonRejection>) -> AppResult<JsonMap> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(AppError::invalid_body("El cuerpo debe ser un objeto JSON.")),
        Err(rejection) => Err(AppError::invalid_body(rejection.body_text())),
    }
}
