// ABOUTME: In-memory form state store for interactive plan editing
// ABOUTME: Identity-addressed CRUD for meals and recipes, index-addressed edits for choice pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Form State Store
//!
//! Holds the editable working set for one session: patient record, meal and
//! recipe lists, substitution pairs, and the free-text alert block. Purely
//! in-memory with no I/O; the session layer owns locking and snapshots.
//!
//! Meals and recipes are addressed by their `Uuid` identity, so edits are
//! stable across removals. Choice pairs carry no identity on the wire and are
//! addressed by position instead.

use uuid::Uuid;

use crate::models::{ChoicePair, MealEntry, PatientRecord, RecipeEntry};

/// Field selector for [`FormState::update_meal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealField {
    /// Time of day
    Time,
    /// Meal name
    Name,
    /// Meal description
    Description,
}

/// Field selector for [`FormState::update_recipe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeField {
    /// Recipe title
    Title,
    /// Ingredient list
    Ingredients,
    /// Preparation steps
    Instructions,
}

/// Field selector for [`FormState::update_choice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceField {
    /// The preferred option
    Recommended,
    /// The option to avoid
    Discouraged,
}

/// Editable working set for one plan-building session
#[derive(Debug, Clone, Default)]
pub struct FormState {
    patient: PatientRecord,
    meals: Vec<MealEntry>,
    recipes: Vec<RecipeEntry>,
    choices: Vec<ChoicePair>,
    alerts_text: String,
}

impl FormState {
    /// Create an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form seeded with representative sample content
    ///
    /// Mirrors a real consultation document; used by shells as a starting
    /// point and by tests as fixture data.
    #[must_use]
    pub fn sample() -> Self {
        let mut form = Self {
            patient: PatientRecord {
                name: "Hilton Luiz da Cunha".into(),
                age: "60".into(),
                weight: "64".into(),
                height: "1,64".into(),
                goal: "Controle Glicêmico e Pressão".into(),
                diagnosis: "Diabetes Mellitus Tipo 2, Hipertensão Arterial".into(),
            },
            alerts_text: "Beber 2L de água/dia.\nDeixar feijão de molho 12h e descartar água."
                .into(),
            ..Self::default()
        };

        for (time, name, description) in [
            (
                "07:00",
                "Café da Manhã",
                "Crepioca (1 un) ou Cuscuz (1 pedaço médio). 2 ovos. 1 col de Linhaça.",
            ),
            (
                "12:30",
                "Almoço",
                "Salada crua à vontade. 1 pedaço de frango/peixe. 1 concha de feijão. 1 col de arroz integral.",
            ),
            (
                "19:00",
                "Jantar",
                "Sopa de legumes com frango. Salada crua. 1 col de linhaça.",
            ),
        ] {
            form.meals.push(MealEntry {
                id: Uuid::new_v4(),
                time: time.into(),
                name: name.into(),
                description: description.into(),
            });
        }

        form.recipes.push(RecipeEntry {
            id: Uuid::new_v4(),
            title: "MIX DE TEMPEROS (Substituto do Sal)".into(),
            ingredients: "1 col Sal Grosso, 1 col Orégano, 1 col Alecrim, 1 col Açafrão.".into(),
            instructions:
                "Bata tudo no liquidificador até virar um pó fino. Use para temperar arroz e feijão."
                    .into(),
        });

        for (recommended, discouraged) in [
            (
                "Tilápia, Merluza, Atum, Frango",
                "Presunto, Salame, Salsicha, Linguiça",
            ),
            (
                "Leite Vegetal, Azeite de Oliva",
                "Manteiga, Queijos gordos, Margarina",
            ),
            (
                "Arroz Integral, Quinoa, Inhame",
                "Arroz Branco, Pão Francês, Biscoitos",
            ),
        ] {
            form.choices.push(ChoicePair {
                recommended: recommended.into(),
                discouraged: discouraged.into(),
            });
        }

        form
    }

    /// Patient record
    #[must_use]
    pub const fn patient(&self) -> &PatientRecord {
        &self.patient
    }

    /// Mutable patient record for field edits
    pub fn patient_mut(&mut self) -> &mut PatientRecord {
        &mut self.patient
    }

    /// Meal list in display order
    #[must_use]
    pub fn meals(&self) -> &[MealEntry] {
        &self.meals
    }

    /// Recipe list in display order
    #[must_use]
    pub fn recipes(&self) -> &[RecipeEntry] {
        &self.recipes
    }

    /// Choice pair list in display order
    #[must_use]
    pub fn choices(&self) -> &[ChoicePair] {
        &self.choices
    }

    /// Newline-delimited alert block
    #[must_use]
    pub fn alerts_text(&self) -> &str {
        &self.alerts_text
    }

    /// Replace the alert block
    pub fn set_alerts(&mut self, text: impl Into<String>) {
        self.alerts_text = text.into();
    }

    /// Append an empty meal row, returning its identity
    pub fn add_meal(&mut self) -> Uuid {
        let entry = MealEntry::new();
        let id = entry.id;
        self.meals.push(entry);
        id
    }

    /// Replace one field on the meal with the given identity
    ///
    /// Returns false (and changes nothing) when the identity is unknown.
    pub fn update_meal(&mut self, id: Uuid, field: MealField, value: impl Into<String>) -> bool {
        let Some(entry) = self.meals.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        match field {
            MealField::Time => entry.time = value.into(),
            MealField::Name => entry.name = value.into(),
            MealField::Description => entry.description = value.into(),
        }
        true
    }

    /// Remove the meal with the given identity
    ///
    /// Returns false when the identity is unknown. Remaining entries keep
    /// their order.
    pub fn remove_meal(&mut self, id: Uuid) -> bool {
        let before = self.meals.len();
        self.meals.retain(|entry| entry.id != id);
        self.meals.len() != before
    }

    /// Append an empty recipe row, returning its identity
    pub fn add_recipe(&mut self) -> Uuid {
        let entry = RecipeEntry::new();
        let id = entry.id;
        self.recipes.push(entry);
        id
    }

    /// Replace one field on the recipe with the given identity
    ///
    /// Returns false (and changes nothing) when the identity is unknown.
    pub fn update_recipe(
        &mut self,
        id: Uuid,
        field: RecipeField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.recipes.iter_mut().find(|entry| entry.id == id) else {
            return false;
        };
        match field {
            RecipeField::Title => entry.title = value.into(),
            RecipeField::Ingredients => entry.ingredients = value.into(),
            RecipeField::Instructions => entry.instructions = value.into(),
        }
        true
    }

    /// Remove the recipe with the given identity
    ///
    /// Returns false when the identity is unknown.
    pub fn remove_recipe(&mut self, id: Uuid) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|entry| entry.id != id);
        self.recipes.len() != before
    }

    /// Append an empty choice pair
    pub fn add_choice(&mut self) {
        self.choices.push(ChoicePair::default());
    }

    /// Replace one side of the pair at the given position
    ///
    /// Positions shift when an earlier pair is removed, so a caller racing
    /// edits against a stale index lands on the wrong pair. Pairs carry no
    /// identity on the wire; position is the only address they have.
    /// Returns false when the position is out of range.
    pub fn update_choice(
        &mut self,
        index: usize,
        field: ChoiceField,
        value: impl Into<String>,
    ) -> bool {
        self.choices.get_mut(index).is_some_and(|pair| {
            match field {
                ChoiceField::Recommended => pair.recommended = value.into(),
                ChoiceField::Discouraged => pair.discouraged = value.into(),
            }
            true
        })
    }

    /// Remove the pair at the given position
    ///
    /// Later pairs shift down by one. Returns false when the position is out
    /// of range.
    pub fn remove_choice(&mut self, index: usize) -> bool {
        if index < self.choices.len() {
            self.choices.remove(index);
            true
        } else {
            false
        }
    }
}
