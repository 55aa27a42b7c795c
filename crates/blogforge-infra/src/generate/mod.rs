//! Article generation backends.

mod gemini;

pub use gemini::{DEFAULT_MODEL, GeminiConfig, GeminiGenerator};
