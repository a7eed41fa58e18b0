use crate::core::guard::InFlightGuard;
use crate::core::history::SharedHistory;
use crate::domain::model::{DreamInterpretationResponse, LuckyResult};
use crate::domain::ports::DreamInterpreter;
use crate::utils::error::{LottoError, Result};

const MAX_TWO_DIGIT_SUGGESTIONS: usize = 3;
const MAX_THREE_DIGIT_SUGGESTIONS: usize = 2;

/// Turns dream text into a recorded AI result through a [`DreamInterpreter`].
pub struct DreamService<I: DreamInterpreter> {
    interpreter: I,
    history: SharedHistory,
    guard: InFlightGuard,
}

impl<I: DreamInterpreter> DreamService<I> {
    pub fn new(interpreter: I, history: SharedHistory) -> Self {
        Self {
            interpreter,
            history,
            guard: InFlightGuard::new("dream interpretation"),
        }
    }

    pub fn is_interpreting(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    /// On any failure the history is left untouched.
    pub async fn interpret(&self, free_text: &str) -> Result<LuckyResult> {
        if free_text.trim().is_empty() {
            return Err(LottoError::EmptyDreamText);
        }

        let _permit = self.guard.try_acquire()?;
        tracing::debug!(
            "Interpreting dream ({} chars)",
            free_text.trim().chars().count()
        );

        let result = self
            .interpreter
            .interpret_dream(free_text)
            .await
            .and_then(to_lucky_result)
            .inspect_err(|e| {
                tracing::error!(
                    "❌ Dream interpretation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
            })?;

        self.history.record(result.clone()).await;
        tracing::info!(
            "🔮 Interpreted dream: {:?} / {:?}",
            result.two_digits(),
            result.three_digits()
        );
        Ok(result)
    }
}

/// 將服務回應轉為帶來源與時間的結果，並檢查位數
pub fn to_lucky_result(response: DreamInterpretationResponse) -> Result<LuckyResult> {
    let DreamInterpretationResponse {
        two_digits,
        three_digits,
        reason,
    } = response;

    let two_digits: Vec<String> = two_digits.iter().map(|d| d.trim().to_string()).collect();
    let three_digits: Vec<String> = three_digits.iter().map(|d| d.trim().to_string()).collect();

    if two_digits.len() > MAX_TWO_DIGIT_SUGGESTIONS
        || three_digits.len() > MAX_THREE_DIGIT_SUGGESTIONS
    {
        tracing::warn!(
            "Interpreter returned more suggestions than requested ({} two-digit, {} three-digit)",
            two_digits.len(),
            three_digits.len()
        );
    }

    LuckyResult::ai(two_digits, three_digits, reason.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Provenance;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubInterpreter {
        response: DreamInterpretationResponse,
        calls: AtomicUsize,
        received: Mutex<Vec<String>>,
        delay: Duration,
    }

    impl StubInterpreter {
        fn new(two: &[&str], three: &[&str], reason: &str) -> Self {
            Self {
                response: DreamInterpretationResponse {
                    two_digits: two.iter().map(|s| s.to_string()).collect(),
                    three_digits: three.iter().map(|s| s.to_string()).collect(),
                    reason: reason.to_string(),
                },
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl DreamInterpreter for StubInterpreter {
        async fn interpret_dream(&self, free_text: &str) -> Result<DreamInterpretationResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.received.lock().unwrap().push(free_text.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.response.clone())
        }
    }

    struct FailingInterpreter;

    #[async_trait]
    impl DreamInterpreter for FailingInterpreter {
        async fn interpret_dream(&self, _free_text: &str) -> Result<DreamInterpretationResponse> {
            Err(LottoError::ServiceError {
                status: 503,
                body: "overloaded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_interpret_maps_and_records() {
        let history = SharedHistory::new();
        let service = DreamService::new(
            StubInterpreter::new(&["07", "18"], &["345"], "ทดสอบ"),
            history.clone(),
        );
        let started = Utc::now();

        let result = service.interpret("ฝันเห็นงู").await.unwrap();

        assert_eq!(result.two_digits(), ["07", "18"]);
        assert_eq!(result.three_digits(), ["345"]);
        assert_eq!(
            result.provenance(),
            &Provenance::Ai {
                description: "ทดสอบ".to_string()
            }
        );
        assert!(result.timestamp() > started);
        assert_eq!(history.all().await, vec![result]);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_calling() {
        let history = SharedHistory::new();
        let service = DreamService::new(StubInterpreter::new(&["07"], &["345"], "x"), history.clone());

        let err = service.interpret("   \n\t").await.unwrap_err();

        assert!(matches!(err, LottoError::EmptyDreamText));
        assert_eq!(service.interpreter().calls.load(Ordering::SeqCst), 0);
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn test_text_is_forwarded_unchanged() {
        let service = DreamService::new(
            StubInterpreter::new(&["07"], &["345"], "x"),
            SharedHistory::new(),
        );

        service.interpret("  ฝันเห็นงู \n").await.unwrap();

        let received = service.interpreter().received.lock().unwrap().clone();
        assert_eq!(received, vec!["  ฝันเห็นงู \n".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_three_digit_suggestions_are_recorded() {
        let history = SharedHistory::new();
        let service = DreamService::new(StubInterpreter::new(&["07"], &[], "r"), history.clone());

        let result = service.interpret("ฝันเห็นงู").await.unwrap();

        assert_eq!(result.two_digits(), ["07"]);
        assert!(result.three_digits().is_empty());
        assert_eq!(result.description(), Some("r"));
        assert_eq!(history.all().await, vec![result]);
    }

    #[tokio::test]
    async fn test_failure_propagates_and_history_untouched() {
        let history = SharedHistory::new();
        let service = DreamService::new(FailingInterpreter, history.clone());

        let err = service.interpret("ฝันเห็นงู").await.unwrap_err();

        assert!(matches!(err, LottoError::ServiceError { status: 503, .. }));
        assert!(err.is_interpretation_failure());
        assert!(history.is_empty().await);
        assert!(!service.is_interpreting());
    }

    #[tokio::test]
    async fn test_invalid_digits_are_malformed() {
        let history = SharedHistory::new();
        let service = DreamService::new(StubInterpreter::new(&["7"], &["345"], "x"), history.clone());

        let err = service.interpret("ฝันเห็นงู").await.unwrap_err();

        assert!(matches!(err, LottoError::InvalidDigits { .. }));
        assert!(err.is_interpretation_failure());
        assert!(history.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_submission_is_rejected() {
        let history = SharedHistory::new();
        let service = DreamService::new(
            StubInterpreter::new(&["07"], &["345"], "x").with_delay(Duration::from_secs(2)),
            history.clone(),
        );

        let (first, second) = tokio::join!(service.interpret("งู"), service.interpret("งู"));

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(LottoError::AlreadyInProgress { .. })
        ));
        assert_eq!(service.interpreter().calls.load(Ordering::SeqCst), 1);
        assert_eq!(history.len().await, 1);
    }

    #[test]
    fn test_to_lucky_result_trims_entries() {
        let response = DreamInterpretationResponse {
            two_digits: vec![" 05".to_string(), "99 ".to_string()],
            three_digits: vec!["123".to_string()],
            reason: " งูใหญ่ ".to_string(),
        };

        let result = to_lucky_result(response).unwrap();

        assert_eq!(result.two_digits(), ["05", "99"]);
        assert_eq!(result.description(), Some("งูใหญ่"));
    }

    #[test]
    fn test_to_lucky_result_accepts_extra_suggestions() {
        let response = DreamInterpretationResponse {
            two_digits: vec!["01".into(), "02".into(), "03".into(), "04".into()],
            three_digits: vec!["123".into()],
            reason: "x".to_string(),
        };

        assert_eq!(to_lucky_result(response).unwrap().two_digits().len(), 4);
    }
}
