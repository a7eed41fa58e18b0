use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::Result;
use crate::utils::validation::validate_digits;

pub const TWO_DIGIT_LEN: usize = 2;
pub const THREE_DIGIT_LEN: usize = 3;

/// Where a result came from. The rationale only exists for AI results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    Random,
    Ai { description: String },
}

/// One immutable lucky-number outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckyResult {
    two_digits: Vec<String>,
    three_digits: Vec<String>,
    #[serde(flatten)]
    provenance: Provenance,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl LuckyResult {
    /// 隨機結果：各一組 2 位數與 3 位數
    pub fn random(two_digits: String, three_digits: String) -> Result<Self> {
        Self::build(vec![two_digits], vec![three_digits], Provenance::Random)
    }

    pub fn ai(two_digits: Vec<String>, three_digits: Vec<String>, description: String) -> Result<Self> {
        Self::build(two_digits, three_digits, Provenance::Ai { description })
    }

    fn build(two_digits: Vec<String>, three_digits: Vec<String>, provenance: Provenance) -> Result<Self> {
        validate_digits("twoDigits", &two_digits, TWO_DIGIT_LEN)?;
        validate_digits("threeDigits", &three_digits, THREE_DIGIT_LEN)?;

        Ok(Self {
            two_digits,
            three_digits,
            provenance,
            timestamp: Utc::now(),
        })
    }

    pub fn two_digits(&self) -> &[String] {
        &self.two_digits
    }

    pub fn three_digits(&self) -> &[String] {
        &self.three_digits
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.provenance, Provenance::Ai { .. })
    }

    pub fn description(&self) -> Option<&str> {
        match &self.provenance {
            Provenance::Ai { description } => Some(description),
            Provenance::Random => None,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Raw shape returned by the dream interpreter, before provenance and timestamp are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamInterpretationResponse {
    pub two_digits: Vec<String>,
    pub three_digits: Vec<String>,
    pub reason: String,
}

/// What the presentation layer shows while (and after) a roll runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollFrame {
    pub two_digits: String,
    pub three_digits: String,
    pub rolling: bool,
}

impl Default for RollFrame {
    fn default() -> Self {
        Self {
            two_digits: "0".repeat(TWO_DIGIT_LEN),
            three_digits: "0".repeat(THREE_DIGIT_LEN),
            rolling: false,
        }
    }
}
