use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 请求参数错误（返回给客户端）
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 状态存储错误
    #[error("状态存储错误: {0}")]
    Store(String),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 文档结构不符合预期
    #[error("文档结构无效 ({path}): {reason}")]
    InvalidShape { path: String, reason: String },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 请求错误
#[derive(Debug, Error)]
pub enum RequestError {
    /// 缺少必填字段
    #[error("{message}")]
    MissingField { field: String, message: String },
    /// 请求体格式不对
    #[error("{message}")]
    InvalidBody { message: String },
    /// 无法识别当前候选人
    #[error("{message}")]
    Unauthorized { message: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建 JSON 解析错误
    pub fn json_parse_failed(path: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建缺少字段错误
    pub fn missing_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Request(RequestError::MissingField {
            field: field.into(),
            message: message.into(),
        })
    }

    /// 创建请求体格式错误
    pub fn invalid_body(message: impl Into<String>) -> Self {
        AppError::Request(RequestError::InvalidBody {
            message: message.into(),
        })
    }

    /// 创建未识别候选人错误
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Request(RequestError::Unauthorized {
            message: message.into(),
        })
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Request(RequestError::Unauthorized { .. }) => StatusCode::UNAUTHORIZED,
            AppError::Request(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::Request(e) => e.to_string(),
            other => {
                tracing::error!("❌ 请求处理失败: {}", other);
                "Error interno del servidor.".to_string()
            }
        };

        let body = Json(serde_json::json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
