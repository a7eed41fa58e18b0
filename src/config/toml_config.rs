use crate::core::roller::RollTiming;
use crate::utils::error::{LottoError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_REASON_LANGUAGE: &str = "Thai";

const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LottoConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub roll: RollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_reason_language")]
    pub reason_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_reason_language() -> String {
    DEFAULT_REASON_LANGUAGE.to_string()
}

fn default_duration_ms() -> u64 {
    1500
}

fn default_interval_ms() -> u64 {
    50
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            reason_language: default_reason_language(),
        }
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl LottoConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LottoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LottoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只靠環境變數：`GEMINI_API_KEY`，其次 `API_KEY`
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 空白的值視同未設定，繼續找下一個名稱
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.gemini.api_key = API_KEY_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .find(|key| !key.trim().is_empty());
        config
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})，未設定者保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LottoError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn api_key(&self) -> Result<&str> {
        let key = validate_required_field("gemini.api_key", &self.gemini.api_key)?;
        validate_non_empty_string("gemini.api_key", key)?;
        if key.starts_with("${") {
            return Err(LottoError::MissingConfigError {
                field: "gemini.api_key".to_string(),
            });
        }
        Ok(key)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.gemini.timeout_seconds)
    }

    pub fn roll_timing(&self) -> RollTiming {
        RollTiming::new(
            Duration::from_millis(self.roll.duration_ms),
            Duration::from_millis(self.roll.interval_ms),
        )
    }
}

impl Validate for LottoConfig {
    fn validate(&self) -> Result<()> {
        self.api_key()?;
        validate_non_empty_string("gemini.model", &self.gemini.model)?;
        validate_url("gemini.base_url", &self.gemini.base_url)?;
        validate_positive_number("gemini.timeout_seconds", self.gemini.timeout_seconds, 1)?;
        validate_non_empty_string("gemini.reason_language", &self.gemini.reason_language)?;

        validate_positive_number("roll.interval_ms", self.roll.interval_ms, 1)?;
        if self.roll.duration_ms > 0 && self.roll.interval_ms > self.roll.duration_ms {
            return Err(LottoError::InvalidConfigValueError {
                field: "roll.interval_ms".to_string(),
                value: self.roll.interval_ms.to_string(),
                reason: format!(
                    "Interval cannot exceed roll duration ({} ms)",
                    self.roll.duration_ms
                ),
            });
        }

        Ok(())
    }
}
