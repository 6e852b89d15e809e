//! Gemini `generateContent` adapter for [`TextCompletionSource`].
//!
//! [`TextCompletionSource`]: crate::domain::ports::TextCompletionSource

mod dto;
mod http_source;

pub use http_source::{DEFAULT_GEMINI_ENDPOINT, GeminiHttpSource};
