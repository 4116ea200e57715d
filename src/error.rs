//! 应用程序错误类型
//!
//! 按来源分层：API 调用、本地输入校验、面试流程状态、会话存储

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 本地输入校验错误
    #[error("输入校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 面试流程错误
    #[error("面试流程错误: {0}")]
    Interview(#[from] InterviewError),
    /// 会话存储错误
    #[error("会话存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 未登录时访问受保护接口
    #[error("用户未登录，无法访问受保护接口: {endpoint}")]
    Unauthenticated { endpoint: String },
    /// 网络请求失败（无响应）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// HTTP 状态码错误（非 2xx）
    #[error("HTTP状态错误 ({status}): {msg}")]
    Http { status: u16, msg: String },
    /// 业务错误（响应包 code 非成功）
    #[error("业务错误 (code={code}): {msg}")]
    Application { code: i64, msg: String },
    /// 响应 JSON 解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    JsonParse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 本地输入校验错误（不发起网络请求）
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("简历内容不能为空")]
    EmptyResume,
    #[error("回答内容不能为空")]
    EmptyAnswer,
    #[error("邮箱格式不正确: {email}")]
    InvalidEmail { email: String },
    #[error("密码不能为空")]
    EmptyPassword,
}

/// 面试流程错误
#[derive(Debug, Error)]
pub enum InterviewError {
    /// 操作在当前状态下不合法
    #[error("操作 {operation} 在状态 {state} 下不合法")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

/// 会话存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("读取会话文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入会话文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("会话文件解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("会话序列化失败: {source}")]
    SerializeFailed {
        #[source]
        source: toml::ser::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParse {
            endpoint: String::new(), // 序列化错误不关联具体接口
            source: err,
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建未登录错误
    pub fn unauthenticated(endpoint: impl Into<String>) -> Self {
        AppError::Api(ApiError::Unauthenticated {
            endpoint: endpoint.into(),
        })
    }

    /// 创建网络请求失败错误
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::Network {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建 HTTP 状态码错误
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        AppError::Api(ApiError::Http {
            status,
            msg: msg.into(),
        })
    }

    /// 创建业务错误
    pub fn application(code: i64, msg: impl Into<String>) -> Self {
        AppError::Api(ApiError::Application {
            code,
            msg: msg.into(),
        })
    }

    /// 创建状态不合法错误
    pub fn invalid_state(operation: &'static str, state: &'static str) -> Self {
        AppError::Interview(InterviewError::InvalidState { operation, state })
    }

    /// 若为业务错误则返回其 code
    pub fn application_code(&self) -> Option<i64> {
        match self {
            AppError::Api(ApiError::Application { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
