//! Driven port for the hosted text-completion model.
//!
//! The domain owns the request shape; adapters only translate it to the
//! provider's wire format.

use async_trait::async_trait;

use crate::domain::CompletionRequest;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while requesting a completion.
    pub enum CompletionSourceError {
        /// No API key is configured.
        MissingKey => "completion API key is not configured",
        /// Network transport failed before receiving a response.
        Transport { message: String } => "completion transport failed: {message}",
        /// Upstream call exceeded the configured timeout.
        Timeout { message: String } => "completion timeout: {message}",
        /// Upstream returned a non-success status.
        Upstream { message: String } => "completion upstream error: {message}",
        /// Upstream response could not be decoded.
        Decode { message: String } => "completion response decode failed: {message}",
    }
}

/// Port for text completion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextCompletionSource: Send + Sync {
    /// Complete `request`, returning the model text (possibly empty).
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionSourceError>;
}

/// Source used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredCompletionSource;

#[async_trait]
impl TextCompletionSource for UnconfiguredCompletionSource {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<String, CompletionSourceError> {
        Err(CompletionSourceError::missing_key())
    }
}
