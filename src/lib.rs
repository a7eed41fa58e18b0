pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::GeminiInterpreter;
pub use crate::app::{GeminiSession, LottoSession};
pub use crate::config::LottoConfig;
pub use crate::core::{
    dream::DreamService,
    generator::generate_digits,
    history::{HistoryStore, SharedHistory},
    roller::{RollTiming, Roller},
};
pub use crate::domain::model::{DreamInterpretationResponse, LuckyResult, Provenance, RollFrame};
pub use crate::domain::ports::{DigitSource, DreamInterpreter, RngDigits, ScriptedDigits};
pub use crate::utils::error::{ErrorCategory, LottoError, Result};
