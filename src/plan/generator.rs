// ABOUTME: Single-exchange plan generator bridging the form state and the provider seam
// ABOUTME: Date stamping, request assembly, strict parsing, and length-mismatch logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, instrument, warn};

use super::prompt::{build_user_prompt, SYSTEM_INSTRUCTION};
use super::schema::clinical_plan_schema;
use crate::config::LlmSettings;
use crate::constants::plan;
use crate::errors::{AppError, AppResult};
use crate::llm::{GenerationProvider, GenerationRequest};
use crate::models::ClinicalPlan;
use crate::store::FormState;

/// Plan generation adapter
///
/// Owns the provider handle and the exchange tunables. Stateless across
/// calls: every `generate` stamps a fresh date, builds a fresh request, and
/// performs exactly one exchange.
pub struct PlanGenerator {
    provider: Arc<dyn GenerationProvider>,
    settings: LlmSettings,
}

impl PlanGenerator {
    /// Create a generator with default settings
    #[must_use]
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self::with_settings(provider, LlmSettings::default())
    }

    /// Create a generator with explicit settings
    #[must_use]
    pub const fn with_settings(provider: Arc<dyn GenerationProvider>, settings: LlmSettings) -> Self {
        Self { provider, settings }
    }

    /// Model name this generator sends with each request
    #[must_use]
    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Generate a clinical plan from a form snapshot
    ///
    /// Accepts the snapshot as-is, empty lists and blank fields included;
    /// the service performs all normalization. The generation date is
    /// stamped locally and echoed by the service into the document.
    ///
    /// # Errors
    ///
    /// Returns a single generation-failed error for both transport/service
    /// faults and shape-violating output; the [`crate::errors::ErrorCode`]
    /// keeps the two distinguishable in logs.
    #[instrument(skip(self, form), fields(model = %self.settings.model))]
    pub async fn generate(&self, form: &FormState) -> AppResult<ClinicalPlan> {
        let date = Local::now().format(plan::DATE_FORMAT).to_string();
        let prompt = build_user_prompt(form, &date)?;

        let mut request =
            GenerationRequest::new(SYSTEM_INSTRUCTION, prompt, clinical_plan_schema())
                .with_model(self.settings.model.clone());
        if let Some(temperature) = self.settings.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_output_tokens) = self.settings.max_output_tokens {
            request = request.with_max_output_tokens(max_output_tokens);
        }

        debug!(
            meals = form.meals().len(),
            recipes = form.recipes().len(),
            choices = form.choices().len(),
            "Requesting plan generation"
        );

        let response = self.provider.complete(&request).await?;

        let generated = parse_plan(&response.content)?;
        check_list_lengths(form, &generated);

        Ok(generated)
    }
}

/// Parse the raw service output into a [`ClinicalPlan`]
///
/// Any structural mismatch is a hard failure; no fields are salvaged from a
/// partially conforming document.
fn parse_plan(content: &str) -> AppResult<ClinicalPlan> {
    serde_json::from_str(content).map_err(|e| {
        error!(error = %e, "Generated document does not match the plan shape");
        AppError::serialization(format!("generated plan does not match the expected shape: {e}"))
            .with_source(e)
    })
}

/// Compare output list lengths with the inputs
///
/// A well-formed document with mismatched lengths is passed through as
/// truth; the mismatch is logged and never repaired. Alerts are exempt:
/// splitting legitimately changes their count.
fn check_list_lengths(form: &FormState, generated: &ClinicalPlan) {
    if generated.meals.len() != form.meals().len() {
        warn!(
            expected = form.meals().len(),
            actual = generated.meals.len(),
            "meal count changed by generation"
        );
    }
    if generated.recipes.len() != form.recipes().len() {
        warn!(
            expected = form.recipes().len(),
            actual = generated.recipes.len(),
            "recipe count changed by generation"
        );
    }
    if generated.choices.len() != form.choices().len() {
        warn!(
            expected = form.choices().len(),
            actual = generated.choices.len(),
            "choice count changed by generation"
        );
    }
}
