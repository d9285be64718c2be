// ABOUTME: Session-scoped state machine tying form edits, generation, and export together
// ABOUTME: In-flight guard, value snapshots, wholesale plan installs, and export gating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Plan Session
//!
//! One [`PlanSession`] per working session, owned by the shell that drives
//! it; there are no ambient globals. The session holds the editable form,
//! the current plan slot, and the in-flight guard.
//!
//! Generation is all-or-nothing: the form is snapshotted by value when the
//! call is issued, the single exchange runs without holding any lock, and on
//! success the plan slot is replaced wholesale. On failure the previous plan
//! stays untouched, which keeps export available for the last good document.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::{AppError, AppResult};
use crate::export::{DocumentRenderer, ExportOptions, RenderedDocument};
use crate::logging::AppLogger;
use crate::models::ClinicalPlan;
use crate::plan::PlanGenerator;
use crate::store::FormState;

/// Observable phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No generation attempted yet
    Idle,
    /// A generation call is in flight
    Generating,
    /// The last generation succeeded; a plan is installed
    Ready,
    /// The last generation failed; a prior plan may still be installed
    Failed,
}

/// Terminal state of past generations
#[derive(Debug, Default)]
struct Outcome {
    plan: Option<ClinicalPlan>,
    last_error: Option<String>,
}

/// Resets the in-flight flag on every exit path
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Session-scoped plan building state
pub struct PlanSession {
    form: RwLock<FormState>,
    outcome: RwLock<Outcome>,
    generating: AtomicBool,
    generator: PlanGenerator,
    initial_form: FormState,
}

impl PlanSession {
    /// Create a session seeded with the sample form
    #[must_use]
    pub fn new(generator: PlanGenerator) -> Self {
        Self::with_form(generator, FormState::sample())
    }

    /// Create a session starting from the given form
    #[must_use]
    pub fn with_form(generator: PlanGenerator, form: FormState) -> Self {
        Self {
            form: RwLock::new(form.clone()),
            outcome: RwLock::new(Outcome::default()),
            generating: AtomicBool::new(false),
            generator,
            initial_form: form,
        }
    }

    /// Read access to the form for rendering
    pub async fn form(&self) -> RwLockReadGuard<'_, FormState> {
        self.form.read().await
    }

    /// Write access to the form for interactive edits
    ///
    /// Edits made while a generation call is outstanding are legal; they
    /// affect the next call, never the snapshot already captured.
    pub async fn form_mut(&self) -> RwLockWriteGuard<'_, FormState> {
        self.form.write().await
    }

    /// Current phase of the session
    pub async fn status(&self) -> SessionStatus {
        if self.generating.load(Ordering::SeqCst) {
            return SessionStatus::Generating;
        }
        let outcome = self.outcome.read().await;
        if outcome.last_error.is_some() {
            SessionStatus::Failed
        } else if outcome.plan.is_some() {
            SessionStatus::Ready
        } else {
            SessionStatus::Idle
        }
    }

    /// Message of the most recent failed generation, if any
    pub async fn last_error(&self) -> Option<String> {
        self.outcome.read().await.last_error.clone()
    }

    /// Clone of the currently installed plan, if any
    pub async fn plan(&self) -> Option<ClinicalPlan> {
        self.outcome.read().await.plan.clone()
    }

    /// True once a generation has succeeded; later failures do not revoke it
    pub async fn export_available(&self) -> bool {
        self.outcome.read().await.plan.is_some()
    }

    /// Generate a plan from the current form values
    ///
    /// Rejects immediately when another call is outstanding; the guard
    /// prevents a second issuance, it never cancels the first. The form is
    /// snapshotted by value before the exchange, so concurrent edits cannot
    /// leak into the captured inputs.
    ///
    /// # Errors
    ///
    /// Returns the generation failure as-is after recording its message;
    /// the previously installed plan, if any, stays in place.
    pub async fn generate(&self) -> AppResult<ClinicalPlan> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::locked("plan generation already in progress"));
        }
        let _guard = InFlightGuard {
            flag: &self.generating,
        };

        let snapshot = self.form.read().await.clone();

        let started = Instant::now();
        let result = self.generator.generate(&snapshot).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok(generated) => {
                AppLogger::log_generation_event(self.generator.model(), true, duration_ms, None);
                let mut outcome = self.outcome.write().await;
                outcome.plan = Some(generated.clone());
                outcome.last_error = None;
                Ok(generated)
            }
            Err(error) => {
                AppLogger::log_generation_event(
                    self.generator.model(),
                    false,
                    duration_ms,
                    Some(error.code.as_str()),
                );
                let mut outcome = self.outcome.write().await;
                outcome.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Render the installed plan through the given renderer
    ///
    /// # Errors
    ///
    /// Fails before the first successful generation, and propagates renderer
    /// failures.
    pub async fn export(&self, renderer: &dyn DocumentRenderer) -> AppResult<RenderedDocument> {
        let Some(generated) = self.outcome.read().await.plan.clone() else {
            return Err(AppError::unavailable("no generated plan to export"));
        };

        let options = ExportOptions::for_patient(&generated.patient.name);
        let result = renderer.render(&generated, &options).await;
        AppLogger::log_export_event(&options.file_name, result.is_ok());
        result
    }

    /// Restore the session to its start state
    ///
    /// Takes the same in-flight slot as [`Self::generate`], so a reset and
    /// a generation can never interleave in either direction.
    ///
    /// # Errors
    ///
    /// Refused while a generation call is outstanding.
    pub async fn reset(&self) -> AppResult<()> {
        if self
            .generating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::locked("cannot reset while generating"));
        }
        let _guard = InFlightGuard {
            flag: &self.generating,
        };

        *self.form.write().await = self.initial_form.clone();
        let mut outcome = self.outcome.write().await;
        outcome.plan = None;
        outcome.last_error = None;
        Ok(())
    }
}
