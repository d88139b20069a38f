use reqwest::StatusCode;

/// Monorail 领域错误
///
/// `Quote` / `SwapExecution` 包装内部错误并保留为 `source()`，
/// 调用方既可以匹配外层种类，也可以通过 [`MonorailError::root`] 取到根因。
#[derive(Debug, thiserror::Error)]
pub enum MonorailError {
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Quote API Error: {0}")]
    Quote(#[source] Box<MonorailError>),

    #[error("Swap Execution Error: {0}")]
    SwapExecution(#[source] Box<MonorailError>),
}

/// 错误种类（不携带数据，便于匹配和断言）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Api,
    TokenNotFound,
    Validation,
    Quote,
    SwapExecution,
}

pub type Result<T, E = MonorailError> = std::result::Result<T, E>;

impl MonorailError {
    pub fn api(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Api {
            message: message.into(),
            status,
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { .. } => ErrorKind::Api,
            Self::TokenNotFound(_) => ErrorKind::TokenNotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Quote(_) => ErrorKind::Quote,
            Self::SwapExecution(_) => ErrorKind::SwapExecution,
        }
    }

    /// 包装错误的直接内部错误
    pub fn inner(&self) -> Option<&MonorailError> {
        match self {
            Self::Quote(inner) | Self::SwapExecution(inner) => Some(inner),
            _ => None,
        }
    }

    /// 逐层展开包装，返回最内层的领域错误
    pub fn root(&self) -> &MonorailError {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    /// 上游 HTTP 状态码（包装错误取根因的状态码）
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// 校验失败对应的字段名
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// 待分类的底层失败
#[derive(Debug)]
pub enum Failure {
    /// 已经是领域错误，原样透传
    Domain(MonorailError),
    /// 上游返回了非 2xx 状态，`message` 来自响应体 `{ "message": ... }`
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    /// 传输层失败（连接、DNS、超时、解码）
    Transport(reqwest::Error),
}

impl From<MonorailError> for Failure {
    fn from(err: MonorailError) -> Self {
        Self::Domain(err)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

/// 将任意底层失败归类为唯一的 [`MonorailError`]
pub fn classify(failure: impl Into<Failure>) -> MonorailError {
    match failure.into() {
        Failure::Domain(err) => err,
        Failure::Status { status, message } => classify_status(status, message),
        Failure::Transport(err) => classify_transport(err),
    }
}

fn classify_status(status: StatusCode, message: Option<String>) -> MonorailError {
    match status {
        StatusCode::NOT_FOUND => MonorailError::api("Resource not found", Some(404)),
        StatusCode::BAD_REQUEST => MonorailError::Validation {
            message: message.unwrap_or_else(|| "Bad request".to_string()),
            field: None,
        },
        s if s.is_server_error() => {
            MonorailError::api("Server error occurred", Some(s.as_u16()))
        }
        s => {
            let message = message.unwrap_or_else(|| {
                format!(
                    "Request failed with status code {} {}",
                    s.as_u16(),
                    s.canonical_reason().unwrap_or("Unknown")
                )
            });
            MonorailError::api(message, Some(s.as_u16()))
        }
    }
}

fn classify_transport(err: reqwest::Error) -> MonorailError {
    // 连接被拒绝和 DNS 解析失败在 reqwest 中都归为 connect 错误
    let message = if err.is_connect() {
        "Network connection failed".to_string()
    } else {
        err.to_string()
    };
    let status = if err.is_connect() {
        None
    } else {
        err.status().map(|s| s.as_u16())
    };

    MonorailError::Api {
        message,
        status,
        source: Some(err),
    }
}
