// ABOUTME: Google Gemini transport for multimodal generateContent requests
// ABOUTME: Sends prompt plus inline photo or audio and returns the raw response envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Transport
//!
//! Implementation of [`VisionTransport`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set `GEMINI_API_KEY` with a key from Google AI Studio. The model, base URL,
//! timeout and temperature come from [`TransportConfig`].

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::{
    GenerationRequest, TransportCapabilities, TransportError, TransportErrorKind, VisionTransport,
};
use crate::config::TransportConfig;
use crate::errors::{AppError, ErrorCode};
use crate::interpretation::RawEnvelope;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// MIME type requested in JSON mode
const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// API Request Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// One conversation turn
#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<ContentPart<'a>>,
}

/// Text or inline media part
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

/// Base64 media embedded in the request
#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

/// Sampling and output settings
#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

// ============================================================================
// Transport Implementation
// ============================================================================

/// Gemini `generateContent` client
pub struct GeminiTransport {
    api_key: String,
    client: Client,
    base_url: String,
    model: String,
    default_temperature: f32,
}

impl GeminiTransport {
    /// Create a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot be built
    pub fn from_config(config: &TransportConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!("{} environment variable not set", TransportConfig::API_KEY_ENV),
                )
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            model: config.model.clone(),
            default_temperature: config.temperature,
        })
    }

    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request<'a>(&self, request: &'a GenerationRequest) -> GeminiRequest<'a> {
        let mut parts = vec![ContentPart::Text {
            text: &request.prompt,
        }];
        if let Some(media) = &request.media {
            parts.push(ContentPart::InlineData {
                inline_data: InlineData {
                    mime_type: &media.mime_type,
                    data: &media.data,
                },
            });
        }

        GeminiRequest {
            contents: vec![GeminiContent { role: "user", parts }],
            generation_config: GenerationConfig {
                temperature: Some(request.temperature.unwrap_or(self.default_temperature)),
                response_mime_type: request.json_mode.then_some(JSON_MIME_TYPE),
            },
        }
    }

    fn map_send_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::new(TransportErrorKind::Timeout, format!("Gemini request timed out: {error}"))
        } else {
            TransportError::new(TransportErrorKind::Network, format!("HTTP request failed: {error}"))
        }
    }

    /// Map a non-success status to a transport error, preferring the vendor's own message
    fn map_api_error(status: u16, response_text: &str) -> TransportError {
        let message = serde_json::from_str::<RawEnvelope>(response_text)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .unwrap_or_else(|| response_text.chars().take(200).collect());

        let message = match status {
            429 => format!("Gemini rate limit exceeded: {message}"),
            401 | 403 => format!("Gemini rejected the API key ({status}): {message}"),
            _ => format!("Gemini API error ({status}): {message}"),
        };
        TransportError::new(TransportErrorKind::Status(status), message)
    }
}

#[async_trait]
impl VisionTransport for GeminiTransport {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn capabilities(&self) -> TransportCapabilities {
        TransportCapabilities::multimodal()
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerationRequest) -> Result<RawEnvelope, TransportError> {
        let url = self.build_url();
        let body = self.build_request(request);

        debug!(
            has_media = request.media.is_some(),
            prompt_len = request.prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini API returned an error status");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        serde_json::from_str::<RawEnvelope>(&response_text).map_err(|e| {
            TransportError::new(
                TransportErrorKind::Decode,
                format!("Failed to parse Gemini response: {e}"),
            )
        })
    }
}

impl Debug for GeminiTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiTransport")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MediaPayload;

    fn transport() -> GeminiTransport {
        let config = TransportConfig {
            api_key: Some("secret-key".to_owned()),
            ..TransportConfig::default()
        };
        GeminiTransport::from_config(&config).unwrap()
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = GeminiTransport::from_config(&TransportConfig::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", transport());
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn request_body_carries_inline_media() {
        let transport = transport();
        let request = GenerationRequest::new("describe")
            .with_media(MediaPayload::from_base64("image/jpeg", "AAAA"))
            .with_temperature(0.5);
        let body = serde_json::to_value(transport.build_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "describe");
        assert_eq!(body["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn free_form_request_omits_mime_type() {
        let transport = transport();
        let request = GenerationRequest::new("describe").with_json_mode(false);
        let body = serde_json::to_value(transport.build_request(&request)).unwrap();

        assert!(body["generationConfig"].get("responseMimeType").is_none());
        assert!(transport.build_url().ends_with("/models/gemini-2.5-flash:generateContent"));
    }

    #[test]
    fn api_error_prefers_vendor_message() {
        let err = GeminiTransport::map_api_error(
            503,
            r#"{"error": {"code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE"}}"#,
        );
        assert_eq!(err.kind, TransportErrorKind::Status(503));
        assert!(err.message.contains("The model is overloaded"));
        assert!(err.is_retryable());
    }
}
