// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Scripted offline generation provider, capturing renderer, and canned plan documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `nutriplan`
//!
//! Provides an offline [`GenerationProvider`] whose replies are scripted per
//! call, a [`DocumentRenderer`] that captures what it was asked to render,
//! and canned plan documents matching the sample form fixture.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use nutriplan::errors::{AppError, AppResult, ErrorCode};
use nutriplan::export::{DocumentRenderer, ExportOptions, RenderedDocument};
use nutriplan::llm::{GenerationProvider, GenerationRequest, GenerationResponse, TokenUsage};
use nutriplan::models::ClinicalPlan;
use serde_json::json;
use tokio::sync::Notify;

/// Model name reported by the scripted provider
pub const TEST_MODEL: &str = "gemini-test";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG environment variable controls test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// =============================================================================
// Canned plan documents
// =============================================================================

/// A document the service would plausibly return for [`FormState::sample`]:
/// units appended, alerts split, list counts preserved, date echoed.
///
/// [`FormState::sample`]: nutriplan::store::FormState::sample
pub fn conforming_plan_value(date: &str) -> serde_json::Value {
    json!({
        "patient": {
            "name": "Hilton Luiz da Cunha",
            "age": "60",
            "weight": "64 kg",
            "height": "1,64 m",
            "goal": "Controle Glicêmico e Pressão",
            "diagnosis": "Diabetes Mellitus Tipo 2, Hipertensão Arterial"
        },
        "date": date,
        "meals": [
            {
                "time": "07:00",
                "name": "Café da Manhã",
                "description": "1 crepioca ou 1 pedaço médio de cuscuz, 2 ovos e 1 colher de linhaça."
            },
            {
                "time": "12:30",
                "name": "Almoço",
                "description": "Salada crua à vontade, 1 porção de frango ou peixe, 1 concha de feijão e 1 colher de arroz integral."
            },
            {
                "time": "19:00",
                "name": "Jantar",
                "description": "Sopa de legumes com frango, salada crua e 1 colher de linhaça."
            }
        ],
        "alerts": [
            "Beber 2 litros de água por dia.",
            "Deixar o feijão de molho por 12 horas e descartar a água."
        ],
        "recipes": [
            {
                "title": "MIX DE TEMPEROS (SUBSTITUTO DO SAL)",
                "ingredients": "1 colher de sal grosso, 1 colher de orégano, 1 colher de alecrim, 1 colher de açafrão.",
                "instructions": "Bata tudo no liquidificador até virar um pó fino. Use para temperar arroz e feijão."
            }
        ],
        "choices": [
            {
                "recommended": "Tilápia, Merluza, Atum, Frango",
                "discouraged": "Presunto, Salame, Salsicha, Linguiça"
            },
            {
                "recommended": "Leite Vegetal, Azeite de Oliva",
                "discouraged": "Manteiga, Queijos gordos, Margarina"
            },
            {
                "recommended": "Arroz Integral, Quinoa, Inhame",
                "discouraged": "Arroz Branco, Pão Francês, Biscoitos"
            }
        ]
    })
}

/// Serialized form of [`conforming_plan_value`]
pub fn conforming_plan_json(date: &str) -> String {
    conforming_plan_value(date).to_string()
}

/// Pull the stamped date back out of a built user prompt
pub fn extract_prompt_date(prompt: &str) -> String {
    prompt
        .lines()
        .find_map(|line| line.strip_prefix("Data do plano: "))
        .map(str::trim)
        .map(ToOwned::to_owned)
        .expect("prompt should embed the plan date")
}

// =============================================================================
// Scripted generation provider
// =============================================================================

/// What the scripted provider does for one `complete` call
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return a conforming plan document echoing the prompt's date
    Conforming,
    /// Return exactly this text as the model output
    Text(String),
    /// Fail the exchange at the transport level
    TransportDown,
    /// Fail the exchange with a service-side outage
    ServiceDown,
    /// Fail the exchange with a quota rejection
    RateLimited,
}

/// Offline [`GenerationProvider`] with per-call scripted replies
///
/// Replies are consumed front to back; once the script is exhausted every
/// further call returns a conforming document. Received prompts and the call
/// count are recorded for assertions.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    started: Option<Arc<Notify>>,
    release: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    /// Provider that plays the given replies in order
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            started: None,
            release: None,
        }
    }

    /// Provider that always returns a conforming document
    pub fn conforming() -> Self {
        Self::new(Vec::new())
    }

    /// Provider that parks inside `complete` until released
    ///
    /// Returns the provider plus two signals: `started` fires when a call
    /// enters `complete`, and notifying `release` lets it proceed.
    pub fn gated(replies: Vec<ScriptedReply>) -> (Arc<Self>, Arc<Notify>, Arc<Notify>) {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let provider = Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            started: Some(Arc::clone(&started)),
            release: Some(Arc::clone(&release)),
        });
        (provider, started, release)
    }

    /// Number of `complete` calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All user prompts received so far, in call order
    pub fn captured_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The most recently received user prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

fn text_response(content: String) -> GenerationResponse {
    GenerationResponse {
        content,
        model: TEST_MODEL.to_owned(),
        usage: Some(TokenUsage {
            prompt_tokens: 420,
            completion_tokens: 512,
            total_tokens: 932,
        }),
        finish_reason: Some("STOP".to_owned()),
    }
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        TEST_MODEL
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        if let Some(started) = &self.started {
            started.notify_one();
        }
        if let Some(release) = &self.release {
            release.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ScriptedReply::Conforming);

        match reply {
            ScriptedReply::Conforming => {
                let date = extract_prompt_date(&request.prompt);
                Ok(text_response(conforming_plan_json(&date)))
            }
            ScriptedReply::Text(text) => Ok(text_response(text)),
            ScriptedReply::TransportDown => Err(AppError::new(
                ErrorCode::ExternalServiceError,
                "gemini request failed: connection refused",
            )),
            ScriptedReply::ServiceDown => Err(AppError::new(
                ErrorCode::ExternalServiceUnavailable,
                "gemini service error (HTTP 503)",
            )),
            ScriptedReply::RateLimited => Err(AppError::new(
                ErrorCode::ExternalRateLimited,
                "API quota exceeded. Please wait 7 seconds and try again.",
            )),
        }
    }
}

// =============================================================================
// Renderers
// =============================================================================

/// [`DocumentRenderer`] that records every render call and returns stub bytes
#[derive(Default)]
pub struct CapturingRenderer {
    calls: Mutex<Vec<(ClinicalPlan, ExportOptions)>>,
}

impl CapturingRenderer {
    /// Fresh renderer with no recorded calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render calls received
    pub fn render_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Options passed to the most recent render call
    pub fn last_options(&self) -> Option<ExportOptions> {
        self.calls.lock().unwrap().last().map(|(_, o)| o.clone())
    }

    /// Plan passed to the most recent render call
    pub fn last_plan(&self) -> Option<ClinicalPlan> {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone())
    }
}

#[async_trait]
impl DocumentRenderer for CapturingRenderer {
    async fn render(
        &self,
        generated: &ClinicalPlan,
        options: &ExportOptions,
    ) -> AppResult<RenderedDocument> {
        self.calls
            .lock()
            .unwrap()
            .push((generated.clone(), options.clone()));
        Ok(RenderedDocument {
            file_name: options.file_name.clone(),
            bytes: b"%PDF-1.4 stub".to_vec(),
        })
    }
}

/// [`DocumentRenderer`] that always fails
pub struct FailingRenderer;

#[async_trait]
impl DocumentRenderer for FailingRenderer {
    async fn render(
        &self,
        _generated: &ClinicalPlan,
        _options: &ExportOptions,
    ) -> AppResult<RenderedDocument> {
        Err(AppError::internal("renderer backend crashed"))
    }
}
