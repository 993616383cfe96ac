//! Recipe validation rules
//!
//! Pure and synchronous: no database access happens here. Rules run in a
//! fixed order and the first failure wins, so a submission is rejected with
//! exactly one message. Name uniqueness needs a database round-trip and is
//! checked by the repository right after these rules pass.

use thiserror::Error;

use crate::db::models::{Category, Difficulty};

/// Minimum trimmed description length (inclusive)
pub const DESCRIPTION_MIN_CHARS: usize = 20;
/// Maximum trimmed description length (inclusive)
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A single rejected rule, with the message shown to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todos los campos son obligatorios.")]
    MissingFields,

    #[error("El nombre debe comenzar con mayúscula.")]
    NameNotCapitalized,

    #[error("La descripción debe tener entre 20 y 500 caracteres.")]
    DescriptionLength,

    #[error("El tiempo de preparación debe ser un número entero positivo.")]
    InvalidPreparationTime,

    #[error("Categoría no válida.")]
    UnknownCategory,

    #[error("Dificultad no válida.")]
    UnknownDifficulty,

    #[error("El nombre y la descripción del paso son obligatorios.")]
    BlankStepFields,

    #[error("¡Solo se permiten archivos de imagen!")]
    NotAnImage,

    #[error("La imagen supera el tamaño máximo de 10 MB.")]
    ImageTooLarge,
}

/// Raw recipe fields as submitted by a form, before any checks
#[derive(Debug, Clone, Default)]
pub struct RecipeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub preparation_time: Option<String>,
}

/// A recipe candidate that passed every synchronous rule
///
/// Text fields are trimmed; `name_key` is the case-folded name used for
/// uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub preparation_time: i64,
}

impl RecipeDraft {
    /// Case-insensitive key for whole-name comparison
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Case-fold a recipe name for uniqueness comparison
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Validate a submitted recipe
///
/// Rule order:
/// 1. every field present and non-blank
/// 2. first character of the trimmed name equals its upper-case form
/// 3. trimmed description length within [20, 500] characters
/// 4. preparation time parses as a base-10 integer greater than zero
/// 5. category is a known tag
/// 6. difficulty is a known tag
pub fn validate_recipe(input: &RecipeInput) -> Result<RecipeDraft, ValidationError> {
    let (name, description, ingredients, category, difficulty, preparation_time) = match (
        present(&input.name),
        present(&input.description),
        present(&input.ingredients),
        present(&input.category),
        present(&input.difficulty),
        present(&input.preparation_time),
    ) {
        (Some(n), Some(d), Some(i), Some(c), Some(df), Some(t)) => (n, d, i, c, df, t),
        _ => return Err(ValidationError::MissingFields),
    };

    if !starts_uppercase(name) {
        return Err(ValidationError::NameNotCapitalized);
    }

    let description_len = description.chars().count();
    if !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&description_len) {
        return Err(ValidationError::DescriptionLength);
    }

    let preparation_time = parse_preparation_time(preparation_time)?;

    let category: Category = category
        .parse()
        .map_err(|_| ValidationError::UnknownCategory)?;
    let difficulty: Difficulty = difficulty
        .parse()
        .map_err(|_| ValidationError::UnknownDifficulty)?;

    Ok(RecipeDraft {
        name: name.to_string(),
        description: description.to_string(),
        ingredients: ingredients.to_string(),
        category,
        difficulty,
        preparation_time,
    })
}

/// Validate step content, returning the trimmed `(name, description)`
pub fn validate_step(name: &str, description: &str) -> Result<(String, String), ValidationError> {
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(ValidationError::BlankStepFields);
    }
    Ok((name.to_string(), description.to_string()))
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Characters without a case distinction (digits, punctuation) compare equal
/// to their own upper-case form and therefore pass.
fn starts_uppercase(name: &str) -> bool {
    match name.chars().next() {
        Some(first) => first.to_uppercase().eq(std::iter::once(first)),
        None => false,
    }
}

fn parse_preparation_time(raw: &str) -> Result<i64, ValidationError> {
    match raw.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ValidationError::InvalidPreparationTime),
    }
}
