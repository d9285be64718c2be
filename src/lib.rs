// ABOUTME: Main library entry point for the NutriPlan clinical plan core
// ABOUTME: Form state, LLM-backed plan generation, session lifecycle, and export boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

#![deny(unsafe_code)]

//! # NutriPlan Core
//!
//! Domain core for a nutritionist-facing meal plan editor. A practitioner
//! fills a structured form (patient record, meals, recipes, food choices,
//! alerts), hands it to an LLM that rewrites the material into a polished
//! clinical document, and exports the result as a paginated PDF.
//!
//! ## Features
//!
//! - **Form state store**: identity-addressed meals and recipes, index-addressed
//!   choice pairs, a free-text alert block
//! - **Plan generation**: one strictly-schematized Gemini exchange per request,
//!   parsed into a typed [`models::ClinicalPlan`] or failed hard
//! - **Session lifecycle**: re-entrancy-guarded generation with snapshot
//!   semantics; a failed attempt never destroys the prior plan
//! - **Export boundary**: fixed A4 full-bleed parameterization behind the
//!   [`export::DocumentRenderer`] trait
//!
//! ## Architecture
//!
//! The crate is a library with no binaries:
//! - **Store**: mutable form state the practitioner edits
//! - **LLM**: provider abstraction plus the Gemini structured-output client
//! - **Plan**: prompt assembly, response schema, strict parsing
//! - **Session**: the state machine tying the other layers together
//! - **Export**: renderer seam and file-name derivation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use nutriplan::llm::GeminiProvider;
//! use nutriplan::plan::PlanGenerator;
//! use nutriplan::session::PlanSession;
//!
//! #[tokio::main]
//! async fn main() -> nutriplan::errors::AppResult<()> {
//!     let provider = GeminiProvider::from_env()?;
//!     let session = PlanSession::new(PlanGenerator::new(Arc::new(provider)));
//!
//!     let plan = session.generate().await?;
//!     println!("plan ready for {}", plan.patient.name);
//!     Ok(())
//! }
//! ```

/// Environment-driven generation settings
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Export boundary for paginated document rendering
pub mod export;

/// LLM provider abstraction and the Gemini structured-output client
pub mod llm;

/// Production logging and structured output
pub mod logging;

/// Common data models for patients, form entries, and generated plans
pub mod models;

/// Plan generation pipeline: prompt assembly, response schema, strict parsing
pub mod plan;

/// Session state machine coordinating form edits, generation, and export
pub mod session;

/// Form state store with identity-addressed and index-addressed collections
pub mod store;
