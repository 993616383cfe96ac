//! Common error types for the recipe catalog

use thiserror::Error;

use crate::validation::ValidationError;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the repository, the image store and the HTTP layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submitted data broke a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Another recipe already uses this name (case-insensitive)
    #[error("Ya existe una receta con el nombre \"{0}\".")]
    DuplicateName(String),

    /// Requested recipe or step does not exist
    #[error("{0}")]
    NotFound(String),

    /// Malformed recipe or step identifier
    #[error("Identificador no válido: {0}")]
    InvalidId(String),

    /// Image file could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Recipe lookup miss
    pub fn recipe_not_found() -> Self {
        Error::NotFound("Receta no encontrada.".to_string())
    }

    /// Step lookup miss (scoped to its recipe)
    pub fn step_not_found() -> Self {
        Error::NotFound("Paso no encontrado en esta receta.".to_string())
    }
}
