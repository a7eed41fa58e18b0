use crate::adapters::GeminiInterpreter;
use crate::config::LottoConfig;
use crate::core::dream::DreamService;
use crate::core::history::SharedHistory;
use crate::core::roller::{RollTiming, Roller};
use crate::domain::model::{LuckyResult, RollFrame};
use crate::domain::ports::{DigitSource, DreamInterpreter, RngDigits};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;

pub type GeminiSession = LottoSession<RngDigits<StdRng>, GeminiInterpreter>;

/// One application session: owns the history and the components that append to it.
pub struct LottoSession<D: DigitSource, I: DreamInterpreter> {
    history: SharedHistory,
    roller: Roller<D>,
    dreams: DreamService<I>,
}

impl<D: DigitSource, I: DreamInterpreter> LottoSession<D, I> {
    pub fn new(source: D, interpreter: I, timing: RollTiming) -> Self {
        let history = SharedHistory::new();
        Self {
            roller: Roller::new(source, history.clone(), timing),
            dreams: DreamService::new(interpreter, history.clone()),
            history,
        }
    }

    pub async fn roll(&self) -> Result<LuckyResult> {
        self.roller.roll().await
    }

    pub async fn interpret_dream(&self, free_text: &str) -> Result<LuckyResult> {
        self.dreams.interpret(free_text).await
    }

    /// Newest first.
    pub async fn history(&self) -> Vec<LuckyResult> {
        self.history.all().await
    }

    pub fn history_handle(&self) -> SharedHistory {
        self.history.clone()
    }

    pub fn subscribe_rolls(&self) -> watch::Receiver<RollFrame> {
        self.roller.subscribe()
    }

    pub fn is_rolling(&self) -> bool {
        self.roller.is_rolling()
    }

    pub fn is_interpreting(&self) -> bool {
        self.dreams.is_interpreting()
    }
}

impl GeminiSession {
    /// 驗證配置後建立連到 Gemini 的 session
    pub fn from_config(config: &LottoConfig) -> Result<Self> {
        config.validate()?;
        let interpreter = GeminiInterpreter::from_config(config)?;
        tracing::info!(
            "Session ready (model {}, roll {:?})",
            config.gemini.model,
            config.roll_timing()
        );
        Ok(Self::new(
            RngDigits::new(StdRng::from_entropy()),
            interpreter,
            config.roll_timing(),
        ))
    }
}
