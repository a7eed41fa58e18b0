pub mod dream;
pub mod generator;
pub mod guard;
pub mod history;
pub mod roller;

pub use crate::domain::model::{DreamInterpretationResponse, LuckyResult, Provenance, RollFrame};
pub use crate::domain::ports::{DigitSource, DreamInterpreter, RngDigits, ScriptedDigits};
pub use crate::utils::error::Result;
