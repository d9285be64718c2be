// ABOUTME: Fixed system instruction and user payload construction for plan generation
// ABOUTME: Embeds the form snapshot and generation date into the single-exchange prompt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriPlan Contributors

//! # Generation Prompt
//!
//! The system instruction states the normalization contract in the document's
//! own language (pt-BR): unit appending with numerals preserved verbatim,
//! professional meal phrasing, alert splitting, upper-cased recipe titles,
//! pair preservation, and JSON-only output. The user payload embeds the
//! patient record, the identity-free meal/recipe projections, the choice
//! pairs, and the raw alert block.

use crate::errors::{AppError, AppResult};
use crate::models::{PlanMeal, PlanRecipe};
use crate::store::FormState;

/// Behavioral contract sent with every generation request
pub const SYSTEM_INSTRUCTION: &str = "\
Você é um assistente especializado em Nutrição Clínica.
Sua tarefa é organizar os dados do paciente em um Plano Alimentar estruturado em JSON.

REGRAS DE FORMATAÇÃO:
1. PESO: Deve ser retornado exatamente como fornecido, seguido da unidade \" kg\". Ex: se receber \"70\", retorne \"70 kg\". Não duplique a unidade se ela já estiver presente.
2. ALTURA: Deve ser retornada exatamente como fornecida, seguida da unidade \" m\", preservando a vírgula decimal. Ex: se receber \"1,75\", retorne \"1,75 m\".
3. REFEIÇÕES: Normalize as descrições para serem claras e profissionais, sem alterar os fatos.
4. ALERTAS: Formate como uma lista de strings curtas, diretas e imperativas. Cada linha das orientações gera ao menos um alerta independente, sem quebras de linha internas.
5. RECEITAS: Garanta passos lógicos e títulos em letras MAIÚSCULAS, preservando a ordem dos passos.
6. ESCOLHAS: Mantenha a estrutura comparativa de cada par (recommended vs. discouraged), sem mesclar nem descartar pares.
7. LISTAS: Mantenha a mesma quantidade e a mesma ordem de itens recebidos em refeições, receitas e escolhas.
8. DATA: Copie exatamente a data fornecida para o campo \"date\".

Retorne APENAS o JSON no formato especificado.";

/// Build the user payload for one generation exchange
///
/// The embedded meal and recipe lists are identity-free projections; editing
/// ids never reach the service.
///
/// # Errors
///
/// Returns a serialization error if a list cannot be rendered as JSON.
pub fn build_user_prompt(form: &FormState, date: &str) -> AppResult<String> {
    let meals: Vec<PlanMeal> = form.meals().iter().map(PlanMeal::from).collect();
    let recipes: Vec<PlanRecipe> = form.recipes().iter().map(PlanRecipe::from).collect();

    let meals_json = serde_json::to_string(&meals)
        .map_err(|e| AppError::serialization(format!("failed to embed meals: {e}")))?;
    let recipes_json = serde_json::to_string(&recipes)
        .map_err(|e| AppError::serialization(format!("failed to embed recipes: {e}")))?;
    let choices_json = serde_json::to_string(form.choices())
        .map_err(|e| AppError::serialization(format!("failed to embed choices: {e}")))?;

    let patient = form.patient();
    Ok(format!(
        "Gere um plano alimentar estruturado para o paciente.
Data do plano: {date}

DADOS DO PACIENTE:
- Nome: {name}
- Idade: {age}
- Peso atual: {weight}
- Altura atual: {height}
- Objetivo: {goal}
- Diagnóstico: {diagnosis}

CONTEÚDO DO PLANO:
- Refeições: {meals_json}
- Receitas: {recipes_json}
- Escolhas comparativas: {choices_json}
- Orientações/Alertas: {alerts}",
        name = patient.name,
        age = patient.age,
        weight = patient.weight,
        height = patient.height,
        goal = patient.goal,
        diagnosis = patient.diagnosis,
        alerts = form.alerts_text(),
    ))
}
