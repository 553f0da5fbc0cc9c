//! 当前候选人提取器
//!
//! 身份认证由外部系统完成，请求头 `X-Evaluacion-Id` 中携带评估 ID

use super::AppState;
use crate::error::AppError;
use crate::models::Candidate;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::warn;

/// 携带评估 ID 的请求头
pub const CANDIDATE_HEADER: &str = "x-evaluacion-id";

/// 当前请求对应的候选人
pub struct CurrentCandidate(pub Candidate);

#[async_trait]
impl FromRequestParts<AppState> for CurrentCandidate {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let evaluation_id = parts
            .headers
            .get(CANDIDATE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::unauthorized("Candidato no identificado."))?;

        match state.candidates.get(evaluation_id) {
            Some(candidate) => Ok(CurrentCandidate(candidate)),
            None => {
                warn!("⚠️ 未知的评估 ID: {}", evaluation_id);
                Err(AppError::unauthorized("Candidato no encontrado."))
            }
        }
    }
}
