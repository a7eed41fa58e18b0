pub mod session;

pub use session::{GeminiSession, LottoSession};
