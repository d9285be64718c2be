// ABOUTME: Declared output shape for generated clinical plans
// ABOUTME: Names every ClinicalPlan field so parsing strictness and the wire contract agree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Plan Output Shape
//!
//! The schema the generation service is constrained to. Required lists here
//! mirror exactly what the serde model in [`crate::models`] refuses to parse
//! without; keeping the two in lockstep is what makes a shape violation a
//! clean hard failure instead of a half-parsed document.

use crate::llm::schema::Schema;

/// Build the declared shape of a generated [`crate::models::ClinicalPlan`]
#[must_use]
pub fn clinical_plan_schema() -> Schema {
    let patient = Schema::object([
        ("name", Schema::string()),
        ("age", Schema::string()),
        (
            "weight",
            Schema::string().describe("peso com unidade, ex: \"64 kg\""),
        ),
        (
            "height",
            Schema::string().describe("altura com unidade, ex: \"1,64 m\""),
        ),
        ("goal", Schema::string()),
        ("diagnosis", Schema::string()),
    ])
    .required(["name", "weight", "height"]);

    let meals = Schema::array(
        Schema::object([
            ("time", Schema::string()),
            ("name", Schema::string()),
            ("description", Schema::string()),
        ])
        .required(["time", "name", "description"]),
    );

    let recipes = Schema::array(
        Schema::object([
            ("title", Schema::string()),
            ("ingredients", Schema::string()),
            ("instructions", Schema::string()),
        ])
        .required(["title", "ingredients", "instructions"]),
    );

    let choices = Schema::array(
        Schema::object([
            ("recommended", Schema::string()),
            ("discouraged", Schema::string()),
        ])
        .required(["recommended", "discouraged"]),
    );

    Schema::object([
        ("patient", patient),
        (
            "date",
            Schema::string().describe("data no formato dd/mm/aaaa"),
        ),
        ("meals", meals),
        ("alerts", Schema::array(Schema::string())),
        ("recipes", recipes),
        ("choices", choices),
    ])
    .required(["patient", "date", "meals", "alerts", "recipes", "choices"])
}
