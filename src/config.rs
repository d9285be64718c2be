// ABOUTME: Environment-driven runtime configuration for the generation exchange
// ABOUTME: Model selection, sampling temperature, and outbound timeout with sane defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Configuration
//!
//! Environment-only configuration in the spirit of twelve-factor deployment.
//! The generation credential is deliberately absent here: it is an opaque
//! secret read by the provider itself, never stored in settings.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::constants::{env_vars, llm, timeouts};

/// Tunables for the generation exchange
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Model name sent to the generation service
    pub model: String,
    /// Sampling temperature; the service default applies when unset
    pub temperature: Option<f32>,
    /// Cap on generated output tokens
    pub max_output_tokens: Option<u32>,
    /// Outbound request timeout; firing is an ordinary transport failure
    pub timeout: Duration,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: llm::DEFAULT_MODEL.into(),
            temperature: None,
            max_output_tokens: Some(llm::DEFAULT_MAX_OUTPUT_TOKENS),
            timeout: Duration::from_secs(timeouts::DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl LlmSettings {
    /// Load settings from the environment, falling back to defaults
    ///
    /// Unparsable values log a warning and fall back rather than failing:
    /// a misconfigured override must not make the session unusable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let model = env::var(env_vars::LLM_MODEL).unwrap_or(defaults.model);

        let temperature = env::var(env_vars::LLM_TEMPERATURE).ok().and_then(|raw| {
            raw.parse::<f32>().map_or_else(
                |_| {
                    warn!(
                        value = %raw,
                        "invalid {}, ignoring override",
                        env_vars::LLM_TEMPERATURE
                    );
                    None
                },
                Some,
            )
        });

        let timeout = env::var(env_vars::HTTP_TIMEOUT_SECS)
            .ok()
            .and_then(|raw| {
                raw.parse::<u64>().map_or_else(
                    |_| {
                        warn!(
                            value = %raw,
                            "invalid {}, using default timeout",
                            env_vars::HTTP_TIMEOUT_SECS
                        );
                        None
                    },
                    Some,
                )
            })
            .map_or(defaults.timeout, Duration::from_secs);

        Self {
            model,
            temperature,
            max_output_tokens: defaults.max_output_tokens,
            timeout,
        }
    }

    /// Override the model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
