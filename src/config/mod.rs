pub mod toml_config;

pub use toml_config::{GeminiConfig, LottoConfig, RollConfig};
