//! # Cocina Common Library
//!
//! Shared code for the recipe catalog service:
//! - Domain models (recipes and their embedded steps)
//! - Recipe validation rules
//! - Database initialization and schema
//! - Configuration loading and root folder resolution
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod uuid_utils;
pub mod validation;

pub use db::models::{Category, Difficulty, Recipe, Step, StepContent, DEFAULT_IMAGE};
pub use error::{Error, Result};
pub use validation::{validate_recipe, RecipeDraft, RecipeInput, ValidationError};
