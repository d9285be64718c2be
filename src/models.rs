// ABOUTME: Core data model for clinical nutrition plans
// ABOUTME: PatientRecord, editable meal/recipe/choice entries, and the generated ClinicalPlan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Plan Data Model
//!
//! Input-side entities carry editing identity (`Uuid`) and free-text fields;
//! the generated [`ClinicalPlan`] is an identity-free snapshot produced by the
//! generation service. All leaf values are opaque strings: the service, not
//! this crate, interprets and normalizes them (units, phrasing, splitting).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Patient identification and clinical context
///
/// Weight and height are unit-less free text on input (`"64"`, `"1,64"`);
/// the generation service appends units on output while preserving the
/// numerals verbatim, decimal commas included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Full patient name
    pub name: String,
    /// Age as entered (free text)
    #[serde(default)]
    pub age: String,
    /// Body weight, unit-less on input
    pub weight: String,
    /// Height, unit-less on input, may carry a locale decimal comma
    pub height: String,
    /// Treatment goal
    #[serde(default)]
    pub goal: String,
    /// Clinical diagnosis
    #[serde(default)]
    pub diagnosis: String,
}

/// Editable meal row in the form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    /// Editing identity, never sent to the generation service
    pub id: Uuid,
    /// Time of day (free text)
    pub time: String,
    /// Meal name
    pub name: String,
    /// Free-text description of the meal contents
    pub description: String,
}

impl MealEntry {
    /// Create an empty entry with a fresh identity
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            time: String::new(),
            name: String::new(),
            description: String::new(),
        }
    }
}

impl Default for MealEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Editable recipe row in the form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    /// Editing identity, never sent to the generation service
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Ingredient list as free text
    pub ingredients: String,
    /// Preparation steps as free text
    pub instructions: String,
}

impl RecipeEntry {
    /// Create an empty entry with a fresh identity
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: String::new(),
            ingredients: String::new(),
            instructions: String::new(),
        }
    }
}

impl Default for RecipeEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// A recommended/discouraged substitution pair
///
/// Pairs carry no identity; they are addressed by position both in the form
/// state and on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePair {
    /// The option the patient should prefer
    pub recommended: String,
    /// The option the patient should avoid
    pub discouraged: String,
}

/// Meal as it appears in a generated plan (identity-free)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanMeal {
    /// Time of day
    pub time: String,
    /// Meal name
    pub name: String,
    /// Professionally phrased description
    pub description: String,
}

impl From<&MealEntry> for PlanMeal {
    fn from(entry: &MealEntry) -> Self {
        Self {
            time: entry.time.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
        }
    }
}

/// Recipe as it appears in a generated plan (identity-free)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecipe {
    /// Upper-cased recipe title
    pub title: String,
    /// Ingredient list
    pub ingredients: String,
    /// Preparation steps in original order
    pub instructions: String,
}

impl From<&RecipeEntry> for PlanRecipe {
    fn from(entry: &RecipeEntry) -> Self {
        Self {
            title: entry.title.clone(),
            ingredients: entry.ingredients.clone(),
            instructions: entry.instructions.clone(),
        }
    }
}

/// Complete generated nutrition plan
///
/// Produced in a single exchange with the generation service and installed
/// wholesale; never assembled field by field. Every list keeps the
/// cardinality and order of its input counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalPlan {
    /// Patient record with units appended to weight and height
    pub patient: PatientRecord,
    /// Generation date, `dd/mm/yyyy`
    pub date: String,
    /// Normalized meals, same order as the form
    pub meals: Vec<PlanMeal>,
    /// Discrete alert strings split from the alert block
    pub alerts: Vec<String>,
    /// Normalized recipes, same order as the form
    pub recipes: Vec<PlanRecipe>,
    /// Substitution pairs, same order as the form
    pub choices: Vec<ChoicePair>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_meal_conversion_drops_identity() {
        let entry = MealEntry {
            id: Uuid::new_v4(),
            time: "08:00".into(),
            name: "Café da manhã".into(),
            description: "Pão integral com ovo".into(),
        };
        let meal = PlanMeal::from(&entry);
        assert_eq!(meal.time, "08:00");
        assert_eq!(meal.name, "Café da manhã");
        let json = serde_json::to_value(&meal).unwrap();
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_choice_pair_wire_keys() {
        let pair = ChoicePair {
            recommended: "Arroz integral".into(),
            discouraged: "Arroz branco".into(),
        };
        let json = serde_json::to_string(&pair).unwrap();
        assert!(json.contains("\"recommended\""));
        assert!(json.contains("\"discouraged\""));
    }

    #[test]
    fn test_clinical_plan_parse_requires_all_lists() {
        // "alerts" missing: the document must not parse.
        let raw = r#"{
            "patient": {"name": "A", "weight": "64 kg", "height": "1,64 m"},
            "date": "01/01/2026",
            "meals": [],
            "recipes": [],
            "choices": []
        }"#;
        assert!(serde_json::from_str::<ClinicalPlan>(raw).is_err());
    }

    #[test]
    fn test_patient_optional_fields_default_empty() {
        let raw = r#"{"name": "A", "weight": "64 kg", "height": "1,64 m"}"#;
        let patient: PatientRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(patient.age, "");
        assert_eq!(patient.goal, "");
        assert_eq!(patient.diagnosis, "");
    }

    #[test]
    fn test_patient_required_fields() {
        let raw = r#"{"name": "A", "height": "1,64 m"}"#;
        assert!(serde_json::from_str::<PatientRecord>(raw).is_err());
    }
}
