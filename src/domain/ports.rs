use crate::domain::model::DreamInterpretationResponse;
use crate::utils::error::{LottoError, Result};
use async_trait::async_trait;
use rand::Rng;

/// Source of single decimal digits for rolls.
pub trait DigitSource: Send {
    /// Returns a value in `0..=9`.
    fn next_digit(&mut self) -> u8;
}

/// Adapts any `rand` generator; each digit is uniform over `0..10`.
#[derive(Debug, Clone)]
pub struct RngDigits<R> {
    rng: R,
}

impl<R: Rng + Send> RngDigits<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> DigitSource for RngDigits<R> {
    fn next_digit(&mut self) -> u8 {
        self.rng.gen_range(0..10)
    }
}

/// Replays a fixed digit sequence, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDigits {
    digits: Vec<u8>,
    position: usize,
}

impl ScriptedDigits {
    pub fn new(digits: impl Into<Vec<u8>>) -> Result<Self> {
        let digits = digits.into();
        if digits.is_empty() || digits.iter().any(|d| *d > 9) {
            return Err(LottoError::InvalidDigits {
                field: "script".to_string(),
                value: format!("{:?}", digits),
                reason: "script must be non-empty and contain 0-9 only".to_string(),
            });
        }
        Ok(Self {
            digits,
            position: 0,
        })
    }
}

impl DigitSource for ScriptedDigits {
    fn next_digit(&mut self) -> u8 {
        let digit = self.digits[self.position % self.digits.len()];
        self.position += 1;
        digit
    }
}

/// 外部夢境解析服務的邊界；測試以 stub 取代
#[async_trait]
pub trait DreamInterpreter: Send + Sync {
    async fn interpret_dream(&self, free_text: &str) -> Result<DreamInterpretationResponse>;
}
