use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 存储相关错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 表单校验错误（会以提示信息的形式展示给用户）
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 请求格式错误（表单、上传）
    #[error("请求错误: {0}")]
    BadRequest(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 请求构建失败
    #[error("构建LLM请求失败: {0}")]
    RequestBuild(String),
}

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
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
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({path}): {source}")]
    JsonEncodeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 用户输入校验错误
///
/// 每个变体都对应一条界面文案（见 [`ValidationError::ui_key`]）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 作业名称、说明或第一个学习目标缺失
    #[error("缺少必填字段（名称、说明、至少一个学习目标）")]
    MissingAssignmentFields,
    /// 提交内容和上传文件都为空
    #[error("提交内容为空")]
    EmptySubmission,
    /// 问题数量超出 1-5
    #[error("问题数量 {0} 超出范围 [1, 5]")]
    QuestionCountOutOfRange(u8),
    /// 不支持的上传文件类型
    #[error("不支持的文件类型: {0}")]
    UnsupportedFileType(String),
    /// 作业不存在
    #[error("作业不存在: {0}")]
    UnknownAssignment(String),
    /// 回答为空
    #[error("回答为空")]
    EmptyAnswer,
    /// 未配置 API Key
    #[error("未配置 LLM API Key")]
    MissingApiKey,
}

impl ValidationError {
    /// 对应的界面文案 key
    pub fn ui_key(&self) -> &'static str {
        match self {
            ValidationError::MissingAssignmentFields => "fields_error",
            ValidationError::EmptySubmission => "submission_error",
            ValidationError::QuestionCountOutOfRange(_) => "questions_range_error",
            ValidationError::UnsupportedFileType(_) => "file_type_error",
            ValidationError::UnknownAssignment(_) => "unknown_assignment_error",
            ValidationError::EmptyAnswer => "empty_answer_error",
            ValidationError::MissingApiKey => "api_key_warning",
        }
    }
}

/// 会话状态错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 当前没有进行中的对话
    #[error("当前没有进行中的评估对话")]
    NoActiveConversation,
    /// 当前已有进行中的对话
    #[error("已有进行中的评估对话")]
    ConversationInProgress,
    /// 不能删除第一个学习目标
    #[error("学习目标索引 {0} 不可删除")]
    ObjectiveNotRemovable(usize),
}

impl SessionError {
    /// 对应的界面文案 key
    pub fn ui_key(&self) -> &'static str {
        match self {
            SessionError::NoActiveConversation => "no_active_conversation",
            SessionError::ConversationInProgress => "conversation_in_progress",
            SessionError::ObjectiveNotRemovable(_) => "objective_not_removable",
        }
    }
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
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

// ========== 便捷构造函数 ==========

impl StorageError {
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

impl LlmError {
    pub fn api_call_failed(model: impl Into<String>, message: impl std::fmt::Display) -> Self {
        LlmError::ApiCallFailed {
            model: model.into(),
            message: message.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

// ========== HTTP 响应 ==========

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(_) | AppError::Validation(_) | AppError::Session(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            _ => {
                tracing::error!("❌ 请求处理失败: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
