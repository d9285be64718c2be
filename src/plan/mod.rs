// ABOUTME: Plan generation adapter built on the generation provider seam
// ABOUTME: Prompt construction, declared output shape, and the single-exchange generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Plan Generation Adapter
//!
//! Turns a form snapshot into a [`crate::models::ClinicalPlan`] through one
//! structured exchange with the generation service. The adapter has no
//! preconditions: empty or partial forms are sent as-is, because textual
//! normalization is the service's job, not ours. A response that does not
//! parse into the plan shape is a hard failure with nothing salvaged.

mod generator;
pub mod prompt;
mod schema;

pub use generator::PlanGenerator;
pub use schema::clinical_plan_schema;
