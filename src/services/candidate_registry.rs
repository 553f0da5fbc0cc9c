//! 候选人登记表
//!
//! 按评估 ID 查找候选人。身份认证由外部系统负责，这里只做查找。

use crate::error::{AppResult, FileError};
use crate::models::{load_json_file, Candidate};
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

/// 候选人登记表
#[derive(Debug, Default)]
pub struct CandidateRegistry {
    candidates: RwLock<HashMap<String, Candidate>>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        let registry = Self::new();
        for candidate in candidates {
            registry.register(candidate);
        }
        registry
    }

    /// 从 JSON 文件（候选人列表）加载
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let candidates: Vec<Candidate> = load_json_file(path)?.ok_or_else(|| FileError::NotFound {
            path: path.display().to_string(),
        })?;
        info!("👤 已加载 {} 个候选人 ({})", candidates.len(), path.display());
        Ok(Self::from_candidates(candidates))
    }

    pub fn register(&self, candidate: Candidate) {
        let mut candidates = self
            .candidates
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        candidates.insert(candidate.id.clone(), candidate);
    }

    pub fn get(&self, evaluation_id: &str) -> Option<Candidate> {
        let candidates = self
            .candidates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        candidates.get(evaluation_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.candidates
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
