//! Reqwest-backed Gemini completion source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{GenerateContentRequestDto, GenerateContentResponseDto};
use crate::domain::CompletionRequest;
use crate::domain::ports::{CompletionSourceError, TextCompletionSource};

/// Public Gemini REST base URL.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Completion source calling `models/{model}:generateContent`.
pub struct GeminiHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
}

impl GeminiHttpSource {
    /// Build a source with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn model_url(&self, model: &str) -> Result<Url, CompletionSourceError> {
        model_url(&self.endpoint, model)
    }
}

fn model_url(endpoint: &Url, model: &str) -> Result<Url, CompletionSourceError> {
    let base = endpoint.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}/models/{model}:generateContent"))
        .map_err(|err| CompletionSourceError::transport(format!("invalid endpoint: {err}")))
}

#[async_trait]
impl TextCompletionSource for GeminiHttpSource {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionSourceError> {
        let model = request.profile.model();
        let url = self.model_url(model)?;
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&GenerateContentRequestDto::from(request))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(model, bytes = body.len(), "gemini response received");
        parse_text(body.as_ref())
    }
}

fn parse_text(body: &[u8]) -> Result<String, CompletionSourceError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|err| {
        CompletionSourceError::decode(format!("invalid generateContent payload: {err}"))
    })?;
    Ok(decoded.into_text())
}

fn map_transport_error(error: reqwest::Error) -> CompletionSourceError {
    if error.is_timeout() {
        CompletionSourceError::timeout(error.to_string())
    } else {
        CompletionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CompletionSourceError {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let preview: String = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(PREVIEW_CHAR_LIMIT)
        .collect();
    let message = format!("status {}: {preview}", status.as_u16());
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CompletionSourceError::timeout(message)
        }
        _ => CompletionSourceError::upstream(message),
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for request shaping and response decoding.

    use super::*;
    use crate::domain::CompletionProfile;
    use rstest::rstest;

    fn request(profile: CompletionProfile) -> CompletionRequest {
        CompletionRequest {
            prompt: "Summarise occupancy".into(),
            system_instruction: "You are the AI Operations Manager for Hotel Fountain.".into(),
            profile,
        }
    }

    #[rstest]
    fn request_body_carries_instruction_and_temperature() {
        let body = serde_json::to_value(GenerateContentRequestDto::from(&request(
            CompletionProfile::Analytical,
        )))
        .expect("serialise");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Summarise occupancy");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are the AI Operations Manager for Hotel Fountain."
        );
        let temperature = body["generationConfig"]["temperature"]
            .as_f64()
            .expect("temperature");
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[rstest]
    #[case::first_candidate(
        r#"{"candidates":[{"content":{"parts":[{"text":"- Clean "},{"text":"204"}]}},{"content":{"parts":[{"text":"ignored"}]}}]}"#,
        "- Clean 204"
    )]
    #[case::blocked(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#, "")]
    #[case::no_candidates(r#"{"promptFeedback":{"blockReason":"OTHER"}}"#, "")]
    fn extracts_first_candidate_text(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(parse_text(body.as_bytes()).expect("decodes"), expected);
    }

    #[rstest]
    fn malformed_payload_is_a_decode_error() {
        let err = parse_text(b"<html>").expect_err("not json");
        assert!(matches!(err, CompletionSourceError::Decode { .. }));
    }

    #[rstest]
    #[case(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn statuses_map_to_timeout_or_upstream(#[case] status: StatusCode, #[case] timeout: bool) {
        let err = map_status_error(status, br#"{"error":{"message":"quota"}}"#);
        assert_eq!(matches!(err, CompletionSourceError::Timeout { .. }), timeout);
        assert!(err.to_string().contains(&status.as_u16().to_string()));
    }

    #[rstest]
    #[case("https://generativelanguage.googleapis.com/v1beta")]
    #[case("https://generativelanguage.googleapis.com/v1beta/")]
    fn model_url_appends_generate_content(#[case] endpoint: &str) {
        let endpoint = Url::parse(endpoint).expect("endpoint");
        let url = model_url(&endpoint, CompletionProfile::Fast.model()).expect("url");
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
