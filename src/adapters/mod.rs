// Adapters layer: concrete implementations for external systems.

pub mod gemini;

pub use gemini::GeminiInterpreter;
