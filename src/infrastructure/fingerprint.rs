//! 文件指纹
//!
//! 缓存项记录读取时各文件的指纹，之后比较指纹判断缓存是否过期

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// 文件内容指纹（长度 + 内容哈希）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileFingerprint {
    pub len: u64,
    pub hash: u64,
}

impl FileFingerprint {
    /// 计算文件指纹，文件不存在或无法读取时返回 `None`
    pub fn of(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        let bytes = std::fs::read(path).ok()?;
        Some(Self::of_bytes(&bytes))
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            len: bytes.len() as u64,
            hash: hasher.finish(),
        }
    }
}

/// 一次查找所依赖的全部文件及其指纹（`None` 表示当时文件不存在）
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
    entries: Vec<(PathBuf, Option<FileFingerprint>)>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个路径的当前状态，重复路径只记录第一次
    pub fn record(&mut self, path: &Path) {
        if self.entries.iter().any(|(p, _)| p == path) {
            return;
        }
        self.entries.push((path.to_path_buf(), FileFingerprint::of(path)));
    }

    /// 返回第一个发生变化的路径
    pub fn first_changed(&self) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(path, recorded)| FileFingerprint::of(path) != *recorded)
            .map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_edit_creation_and_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.json");
        let missing = dir.path().join("b.json");
        std::fs::write(&existing, "[1]").unwrap();

        let mut deps = DependencySet::new();
        deps.record(&existing);
        deps.record(&missing);
        deps.record(&existing);
        assert_eq!(deps.len(), 2);
        assert!(deps.first_changed().is_none());

        std::fs::write(&missing, "{}").unwrap();
        assert_eq!(deps.first_changed(), Some(missing.as_path()));

        std::fs::remove_file(&missing).unwrap();
        std::fs::write(&existing, "[1, 2]").unwrap();
        assert_eq!(deps.first_changed(), Some(existing.as_path()));
    }
}
