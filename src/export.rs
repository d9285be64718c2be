// ABOUTME: Export boundary for rendering generated plans into paginated documents
// ABOUTME: Fixed A4 full-bleed parameterization, derived file names, and the renderer trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Export Boundary
//!
//! The paginated-document engine is a black box behind [`DocumentRenderer`];
//! this crate fixes only the parameterization: A4 portrait, zero margins so
//! the document's own styling fills the page, high-fidelity rasterization,
//! and a file name derived from the patient name.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constants::export;
use crate::errors::AppResult;
use crate::models::ClinicalPlan;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    /// Tall page, the plan document's layout
    Portrait,
    /// Wide page
    Landscape,
}

/// Raster image encoding for rendered pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEncoding {
    /// JPEG, quality-controlled
    Jpeg,
    /// PNG, lossless
    Png,
}

/// Fixed parameterization handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Output file name, derived from the patient name
    pub file_name: String,
    /// Page width in millimeters
    pub page_width_mm: f32,
    /// Page height in millimeters
    pub page_height_mm: f32,
    /// Page orientation
    pub orientation: PageOrientation,
    /// Page margin in millimeters
    pub margin_mm: f32,
    /// Raster encoding for page images
    pub image_encoding: ImageEncoding,
    /// Encoding quality (0.0 - 1.0), meaningful for JPEG
    pub image_quality: f32,
    /// Raster scale multiplier for print fidelity
    pub raster_scale: f32,
}

impl ExportOptions {
    /// A4 portrait full-bleed options with a file name derived from the
    /// patient name
    #[must_use]
    pub fn for_patient(patient_name: &str) -> Self {
        Self {
            file_name: export_file_name(patient_name),
            page_width_mm: export::A4_WIDTH_MM,
            page_height_mm: export::A4_HEIGHT_MM,
            orientation: PageOrientation::Portrait,
            margin_mm: export::MARGIN_MM,
            image_encoding: ImageEncoding::Jpeg,
            image_quality: export::IMAGE_QUALITY,
            raster_scale: export::RASTER_SCALE,
        }
    }
}

/// Derive the export file name from a patient name
///
/// Spaces become underscores; all other characters pass through unchanged.
#[must_use]
pub fn export_file_name(patient_name: &str) -> String {
    format!(
        "{}{}{}",
        export::FILE_PREFIX,
        patient_name.replace(' ', "_"),
        export::FILE_EXTENSION
    )
}

/// A rendered document ready to hand to the user
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// File name the document should be saved under
    pub file_name: String,
    /// Encoded document bytes
    pub bytes: Vec<u8>,
}

/// Paginated-document renderer boundary
///
/// Implementations own the layout and encoding engine; this crate never
/// inspects the produced bytes.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render a generated plan into a document
    async fn render(
        &self,
        generated: &ClinicalPlan,
        options: &ExportOptions,
    ) -> AppResult<RenderedDocument>;
}
