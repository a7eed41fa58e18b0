use crate::config::LottoConfig;
use crate::domain::model::DreamInterpretationResponse;
use crate::domain::ports::DreamInterpreter;
use crate::utils::error::{LottoError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;

/// Dream interpreter backed by the Gemini `generateContent` endpoint in JSON-schema mode.
#[derive(Clone)]
pub struct GeminiInterpreter {
    client: Client,
    endpoint: String,
    api_key: String,
    reason_language: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GeminiInterpreter {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            api_key: api_key.into(),
            reason_language: crate::config::toml_config::DEFAULT_REASON_LANGUAGE.to_string(),
        })
    }

    pub fn from_config(config: &LottoConfig) -> Result<Self> {
        let interpreter = Self::new(
            &config.gemini.base_url,
            &config.gemini.model,
            config.api_key()?,
            config.request_timeout(),
        )?;
        Ok(interpreter.with_reason_language(&config.gemini.reason_language))
    }

    pub fn with_reason_language(mut self, language: &str) -> Self {
        self.reason_language = language.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn prompt(&self, free_text: &str) -> String {
        format!(
            "Please interpret this dream or context into lucky Thai lottery numbers (2 digits and 3 digits).\n\
             Input text: \"{}\"\n\n\
             Provide a brief reasoning in {} language explaining why these numbers are related to the dream.\n\
             Return strictly JSON.",
            free_text, self.reason_language
        )
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "twoDigits": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of lucky 2-digit numbers (e.g., '99', '05'). Generate 1-3 numbers."
                },
                "threeDigits": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of lucky 3-digit numbers (e.g., '999', '123'). Generate 1-2 numbers."
                },
                "reason": {
                    "type": "STRING",
                    "description": format!("Short explanation in {} language.", self.reason_language)
                }
            },
            "required": ["twoDigits", "threeDigits", "reason"]
        })
    }

    fn build_request(&self, free_text: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(self.prompt(free_text)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: self.response_schema(),
            },
        }
    }
}

impl fmt::Debug for GeminiInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiInterpreter")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("reason_language", &self.reason_language)
            .finish_non_exhaustive()
    }
}

/// 取出第一個候選回應的文字，並解析成預期結構
fn parse_response_body(body: &str) -> Result<DreamInterpretationResponse> {
    let envelope: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| LottoError::MalformedResponse {
            message: format!("Unexpected response envelope: {}", e),
        })?;

    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(LottoError::EmptyResponse);
    }

    serde_json::from_str(text.trim()).map_err(|e| LottoError::MalformedResponse {
        message: format!("Response text is not a dream interpretation: {}", e),
    })
}

#[async_trait]
impl DreamInterpreter for GeminiInterpreter {
    async fn interpret_dream(&self, free_text: &str) -> Result<DreamInterpretationResponse> {
        let request = self.build_request(free_text);

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(LottoError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        parse_response_body(&body)
    }
}
