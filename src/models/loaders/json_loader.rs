use crate::error::{AppError, AppResult, FileError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// 读取 JSON 文件
///
/// 文件不存在时返回 `Ok(None)`；读取或解析失败返回错误，由调用方决定是否继续。
pub fn read_json_file(path: &Path) -> AppResult<Option<Value>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| AppError::json_parse_failed(path.display().to_string(), e))?;

    Ok(Some(value))
}

/// 读取 JSON 文件并反序列化为指定类型
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    match read_json_file(path)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| AppError::json_parse_failed(path.display().to_string(), e)),
        None => Ok(None),
    }
}

/// 列出目录下所有 `.json` 文件（按文件名排序）
pub fn list_json_files(folder: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }
        .into());
    }

    let entries = fs::read_dir(folder)
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();

    Ok(files)
}

/// 列出目录下的直接子目录（按名称排序），目录不存在时返回空列表
pub fn list_subdirectories(folder: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(folder) else {
        return Vec::new();
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}
