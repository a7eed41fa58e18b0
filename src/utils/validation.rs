use crate::utils::error::{LottoError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(LottoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(LottoError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(LottoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(LottoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| LottoError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LottoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 每個字串必須恰好 `length` 個字元，且全為 `0`-`9`；空序列視為合法
pub fn validate_digits(field_name: &str, values: &[String], length: usize) -> Result<()> {
    for value in values {
        if value.chars().count() != length {
            return Err(LottoError::InvalidDigits {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("expected exactly {} digits", length),
            });
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(LottoError::InvalidDigits {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "only characters 0-9 are allowed".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("gemini.base_url", "https://example.com").is_ok());
        assert!(validate_url("gemini.base_url", "http://127.0.0.1:8080").is_ok());
        assert!(validate_url("gemini.base_url", "").is_err());
        assert!(validate_url("gemini.base_url", "invalid-url").is_err());
        assert!(validate_url("gemini.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("gemini.timeout_seconds", 30, 1).is_ok());
        assert!(validate_positive_number("gemini.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key = Some("secret".to_string());
        assert_eq!(validate_required_field("gemini.api_key", &key).unwrap(), "secret");

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("gemini.api_key", &missing),
            Err(LottoError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_digits() {
        let two = vec!["07".to_string(), "18".to_string()];
        assert!(validate_digits("twoDigits", &two, 2).is_ok());

        assert!(validate_digits("threeDigits", &[], 3).is_ok());
        assert!(validate_digits("twoDigits", &["7".to_string()], 2).is_err());
        assert!(validate_digits("threeDigits", &["12a".to_string()], 3).is_err());
        // 全形數字不算
        assert!(validate_digits("twoDigits", &["０７".to_string()], 2).is_err());
    }
}
