// ABOUTME: Generation provider abstraction for pluggable structured-output AI backends
// ABOUTME: Defines the request/response contract and the provider trait the session depends on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Generation Provider Interface
//!
//! Contract for the external structured-generation service. The plan adapter
//! talks to this trait only; concrete providers (Gemini today) live behind
//! it, so tests inject an offline implementation and the session never learns
//! which backend produced a document.
//!
//! A request carries a fixed system instruction, one user prompt, and a
//! declared output shape ([`schema::Schema`]). A response is the raw JSON
//! text the service produced; parsing it into a domain type is the caller's
//! job.

mod gemini;
pub mod schema;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use schema::Schema;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a structured generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fixed behavioral instruction for the service
    pub system_instruction: String,
    /// User payload for this exchange
    pub prompt: String,
    /// Declared shape the service output must conform to
    pub response_schema: Schema,
    /// Model identifier (provider-specific); provider default when unset
    pub model: Option<String>,
    /// Temperature for response randomness (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    /// Create a new generation request
    #[must_use]
    pub fn new(
        system_instruction: impl Into<String>,
        prompt: impl Into<String>,
        response_schema: Schema,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
            response_schema,
            model: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum output tokens
    #[must_use]
    pub const fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Response from a structured generation exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Raw JSON text produced by the service
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Structured generation provider trait
///
/// Implement this trait to plug in a generation backend. Exactly one
/// request/response exchange per `complete` call: no retries, no caching,
/// no batching.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Default model used when the request does not name one
    fn default_model(&self) -> &str;

    /// Perform a single structured generation exchange
    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse, AppError>;
}
