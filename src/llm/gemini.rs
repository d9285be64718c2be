// ABOUTME: Google Gemini structured-generation provider over the Generative AI REST API
// ABOUTME: Single generateContent exchange with a declared response schema, no retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Gemini Provider
//!
//! Implementation of the [`GenerationProvider`] trait for Google's Gemini
//! models, constrained to JSON output via `responseMimeType` and
//! `responseSchema`.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio: <https://aistudio.google.com/app/apikey>

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::schema::Schema;
use super::{GenerationProvider, GenerationRequest, GenerationResponse, TokenUsage};
use crate::constants::{env_vars, llm};
use crate::errors::{AppError, ErrorCode};

/// Base URL for the Gemini API
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// MIME type requested for structured output
const JSON_MIME_TYPE: &str = "application/json";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

/// Content structure for the Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

/// Part of content; only text parts appear in schema-constrained exchanges
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
///
/// `response_mime_type` and `response_schema` are what turn a free-text
/// completion into a structured one; they are always sent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
    response_mime_type: &'static str,
    response_schema: Schema,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Usage metadata from a Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini structured-generation provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    request_timeout: Option<Duration>,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            default_model: llm::DEFAULT_MODEL.to_owned(),
            request_timeout: None,
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var(env_vars::GEMINI_API_KEY)
            .map_err(|_| AppError::config_missing(env_vars::GEMINI_API_KEY))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Bound the outbound request; firing surfaces as an ordinary
    /// service-unavailable failure
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{API_BASE_URL}/models/{model}:{method}?key={}",
            self.api_key
        )
    }

    /// Build a Gemini API request from a [`GenerationRequest`]
    fn build_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts: vec![ContentPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![ContentPart {
                    text: Some(request.system_instruction.clone()),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                candidate_count: 1,
                response_mime_type: JSON_MIME_TYPE,
                response_schema: request.response_schema.clone(),
            },
        }
    }

    /// Extract text content from a Gemini response
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| AppError::external_service("gemini", "no text content in response"))
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map an API error status to the appropriate error type
    ///
    /// For rate limit (429) errors, returns a user-friendly message that
    /// exposes the retry hint from Gemini.
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        // Try to extract the error message from the JSON response
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => {
                let user_message = Self::extract_quota_message(&message);
                AppError::new(ErrorCode::ExternalRateLimited, user_message)
            }
            500..=599 => AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                format!("Gemini API error ({status}): {message}"),
            ),
            _ => AppError::external_service("gemini", format!("API error ({status}): {message}")),
        }
    }

    /// Extract a user-friendly quota/rate limit message from a Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Look for "Please retry in X" and extract the time value
        // Example: "Please retry in 6.406453963s."
        if let Some(retry_pos) = message.find("Please retry in ") {
            let after_prefix = &message[retry_pos + 16..];
            if let Some(s_pos) = after_prefix.find('s') {
                let time_str = &after_prefix[..s_pos];
                if let Ok(seconds) = time_str.parse::<f64>() {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let url = self.build_url(model, "generateContent");

        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending structured generation request to Gemini API");

        let mut http_request = self.client.post(&url).json(&gemini_request);
        if let Some(timeout) = self.request_timeout {
            http_request = http_request.timeout(timeout);
        }

        let response = http_request.send().await.map_err(|e| {
            let code = if e.is_timeout() || e.is_connect() {
                ErrorCode::ExternalServiceUnavailable
            } else {
                ErrorCode::ExternalServiceError
            };
            AppError::new(code, format!("HTTP request failed: {e}")).with_source(e)
        })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::external_service("gemini", format!("failed to read response: {e}")))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response envelope");
                AppError::external_service("gemini", format!("malformed response envelope: {e}"))
                    .with_source(e)
            })?;

        if let Some(api_error) = gemini_response.error {
            return Err(AppError::external_service("gemini", api_error.message));
        }

        let content = Self::extract_content(&gemini_response)?;
        let usage = gemini_response
            .usage_metadata
            .as_ref()
            .map(Self::convert_usage);
        let finish_reason = gemini_response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.clone());

        debug!("Successfully received Gemini response");

        Ok(GenerationResponse {
            content,
            model: model.to_owned(),
            usage,
            finish_reason,
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("api_key", &"[REDACTED]")
            // Omit `client` as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message_extraction() {
        let raw = "Resource exhausted. Please retry in 6.406453963s.";
        let message = GeminiProvider::extract_quota_message(raw);
        assert_eq!(
            message,
            "AI service quota exceeded. Please try again in 7 seconds."
        );

        let fallback = GeminiProvider::extract_quota_message("quota exceeded");
        assert!(fallback.contains("wait a moment"));
    }

    #[test]
    fn test_api_error_mapping() {
        let rate_limited = GeminiProvider::map_api_error(429, "{}");
        assert_eq!(rate_limited.code, ErrorCode::ExternalRateLimited);

        let unavailable = GeminiProvider::map_api_error(503, "overloaded");
        assert_eq!(unavailable.code, ErrorCode::ExternalServiceUnavailable);

        let bad_request = GeminiProvider::map_api_error(
            400,
            r#"{"error": {"message": "Invalid schema"}}"#,
        );
        assert_eq!(bad_request.code, ErrorCode::ExternalServiceError);
        assert!(bad_request.message.contains("Invalid schema"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let provider = GeminiProvider::new("secret-key");
        let rendered = format!("{provider:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_request_body_uses_camel_case_wire_keys() {
        let request = GenerationRequest::new(
            "Você é um assistente.",
            "Gere o plano.",
            crate::plan::clinical_plan_schema(),
        )
        .with_temperature(0.2)
        .with_max_output_tokens(2048);

        let body = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert!(body.get("systemInstruction").is_some());

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["candidateCount"], 1);
        assert_eq!(config["maxOutputTokens"], 2048);
        assert!(config["responseSchema"]["properties"]
            .get("patient")
            .is_some());
    }
}
