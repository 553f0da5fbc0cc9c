use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "QUESTION_MASTER_CONFIG";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题目数据根目录（包含 secciones / grupos / datos / catalogos）
    pub data_root: String,
    /// 旧版资源目录，只在找不到其他位置时使用
    pub resources_dir: String,
    /// 启动时汇总全部题目所用的企业（为空时使用全局目录）
    pub default_tenant: Option<String>,
    /// 监听地址
    pub bind_addr: String,
    /// 监听端口
    pub port: u16,
    /// 候选人未设置语言时使用的语言
    pub default_language: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 候选人列表 JSON 文件
    pub candidates_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: "inv_datos".to_string(),
            resources_dir: "resources".to_string(),
            default_tenant: None,
            bind_addr: "0.0.0.0".to_string(),
            port: 8000,
            default_language: "ESP".to_string(),
            verbose_logging: false,
            candidates_file: None,
        }
    }
}

impl Config {
    /// 加载配置：先读取可选的 TOML 文件，再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_toml_file(Path::new(&path))?,
            _ => Self::default(),
        };
        base.with_env_overrides()
    }

    /// 只从环境变量读取，缺省值来自 `Default`
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件读取配置，未出现的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    fn with_env_overrides(self) -> AppResult<Self> {
        Ok(Self {
            data_root: std::env::var("DATA_ROOT").unwrap_or(self.data_root),
            resources_dir: std::env::var("RESOURCES_DIR").unwrap_or(self.resources_dir),
            default_tenant: non_empty_env("DEFAULT_TENANT").or(self.default_tenant),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(self.bind_addr),
            port: parse_env("PORT", "u16")?.unwrap_or(self.port),
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .map(|v| v.to_uppercase())
                .unwrap_or(self.default_language),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?.unwrap_or(self.verbose_logging),
            candidates_file: non_empty_env("CANDIDATES_FILE").or(self.candidates_file),
        })
    }
}

fn non_empty_env(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

/// 解析环境变量，变量存在但格式不对时报错而不是静默忽略
fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_toml_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_root = \"/srv/inv_datos\"\nport = 9100\ndefault_tenant = \"acme\"").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.data_root, "/srv/inv_datos");
        assert_eq!(config.port, 9100);
        assert_eq!(config.default_tenant.as_deref(), Some("acme"));
        // 未配置的字段保持默认值
        assert_eq!(config.default_language, "ESP");
        assert_eq!(config.resources_dir, "resources");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML"), "错误信息应说明 TOML 解析失败: {}", err);
    }
}
