// ABOUTME: Application constants organized by domain
// ABOUTME: Service identity, environment variable names, model defaults, and export geometry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Constants Module
//!
//! Application constants grouped by domain. Environment variable names live
//! here so config, logging, and providers agree on them.

/// Service identity
pub mod service {
    /// Service name used in logs and outbound error messages
    pub const NAME: &str = "nutriplan";
    /// Crate version reported at startup
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Environment variable names
pub mod env_vars {
    /// Generation service credential (opaque, read only by the provider)
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Override for the generation model name
    pub const LLM_MODEL: &str = "NUTRIPLAN_LLM_MODEL";
    /// Override for the sampling temperature
    pub const LLM_TEMPERATURE: &str = "NUTRIPLAN_LLM_TEMPERATURE";
    /// Outbound request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "NUTRIPLAN_HTTP_TIMEOUT_SECS";
}

/// Generation model defaults
pub mod llm {
    /// Model used when no override is configured
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    /// Cap on generated output tokens; plans are small documents
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
}

/// Plan formatting
pub mod plan {
    /// Generation date rendering, day first as printed on the document
    pub const DATE_FORMAT: &str = "%d/%m/%Y";
}

/// Export geometry and file naming
pub mod export {
    /// A4 page width in millimeters
    pub const A4_WIDTH_MM: f32 = 210.0;
    /// A4 page height in millimeters
    pub const A4_HEIGHT_MM: f32 = 297.0;
    /// Page margin in millimeters; the document fills the full page
    pub const MARGIN_MM: f32 = 0.0;
    /// JPEG quality for rasterized pages
    pub const IMAGE_QUALITY: f32 = 0.98;
    /// Raster scale multiplier for print fidelity
    pub const RASTER_SCALE: f32 = 2.0;
    /// File name prefix for exported plans
    pub const FILE_PREFIX: &str = "Plano_";
    /// File name extension for exported plans
    pub const FILE_EXTENSION: &str = ".pdf";
}

/// Timeouts
pub mod timeouts {
    /// Outbound request timeout when none is configured
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
}
