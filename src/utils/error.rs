use thiserror::Error;

#[derive(Error, Debug)]
pub enum LottoError {
    #[error("Dream text cannot be empty or whitespace-only")]
    EmptyDreamText,

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Interpreter service returned {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Interpreter service returned no response text")]
    EmptyResponse,

    #[error("Malformed interpreter response: {message}")]
    MalformedResponse { message: String },

    #[error("Invalid digits in {field}: {value:?} ({reason})")]
    InvalidDigits {
        field: String,
        value: String,
        reason: String,
    },

    #[error("A {operation} is already in progress")]
    AlreadyInProgress { operation: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入錯誤，尚未呼叫外部服務
    Input,
    /// 外部服務無法連線或回傳失敗
    External,
    /// 回應缺失或無法解析為預期格式
    MalformedResponse,
    /// 同一操作已在進行中
    Busy,
    Configuration,
}

impl LottoError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LottoError::EmptyDreamText => ErrorCategory::Input,
            LottoError::ApiError(_) | LottoError::ServiceError { .. } => ErrorCategory::External,
            LottoError::EmptyResponse
            | LottoError::MalformedResponse { .. }
            | LottoError::InvalidDigits { .. } => ErrorCategory::MalformedResponse,
            LottoError::AlreadyInProgress { .. } => ErrorCategory::Busy,
            LottoError::IoError(_)
            | LottoError::ConfigError { .. }
            | LottoError::MissingConfigError { .. }
            | LottoError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// External and malformed-response failures are reported to the user as one outcome.
    pub fn is_interpretation_failure(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::External | ErrorCategory::MalformedResponse
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => "กรุณาเล่าความฝันของคุณก่อน".to_string(),
            ErrorCategory::External | ErrorCategory::MalformedResponse => {
                "ขออภัย ไม่สามารถทำนายฝันได้ในขณะนี้ โปรดลองใหม่อีกครั้ง".to_string()
            }
            ErrorCategory::Busy => "กำลังดำเนินการอยู่ โปรดรอสักครู่".to_string(),
            ErrorCategory::Configuration => format!("การตั้งค่าไม่ถูกต้อง: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LottoError>;
