//! Step endpoints, always addressed through the owning recipe

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use cocina_common::uuid_utils::parse_id;
use cocina_common::Result;
use uuid::Uuid;

use super::envelope::{Envelope, StepCreated, StepUpdated};
use super::error::{ApiError, PageError};
use super::forms::StepInput;
use crate::views::{render, View};
use crate::AppState;

fn parse_ids(recipe_id: &str, step_id: &str) -> Result<(Uuid, Uuid)> {
    Ok((parse_id(recipe_id)?, parse_id(step_id)?))
}

/// POST /receta/:id/paso/nuevo
pub async fn add_step(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    StepInput(payload): StepInput,
) -> std::result::Result<Json<Envelope<StepCreated>>, ApiError> {
    let recipe_id = parse_id(&recipe_id)?;
    let step = state
        .recipes
        .add_step(recipe_id, &payload.step_name, &payload.step_description)
        .await?;

    Ok(Json(Envelope::with(
        "Paso añadido correctamente.",
        StepCreated { step, recipe_id },
    )))
}

/// GET /receta/:id/paso/editar/:stepId
pub async fn edit_step_form(
    State(state): State<AppState>,
    Path((recipe_id, step_id)): Path<(String, String)>,
) -> std::result::Result<Html<String>, PageError> {
    let (recipe_id, step_id) = parse_ids(&recipe_id, &step_id)?;
    let recipe = state.recipes.find_by_id(recipe_id).await?;
    let step = state.recipes.get_step(recipe_id, step_id).await?;

    Ok(Html(render(View::EditStep {
        recipe: &recipe,
        step: &step,
    })))
}

/// POST /receta/:id/paso/editar/:stepId
pub async fn update_step(
    State(state): State<AppState>,
    Path((recipe_id, step_id)): Path<(String, String)>,
    StepInput(payload): StepInput,
) -> std::result::Result<Json<Envelope<StepUpdated>>, ApiError> {
    let (recipe_id, step_id) = parse_ids(&recipe_id, &step_id)?;
    let step = state
        .recipes
        .update_step(
            recipe_id,
            step_id,
            &payload.step_name,
            &payload.step_description,
        )
        .await?;

    Ok(Json(Envelope::with(
        "Paso actualizado correctamente.",
        StepUpdated { step },
    )))
}

/// POST /receta/:id/paso/borrar/:stepId
pub async fn delete_step(
    State(state): State<AppState>,
    Path((recipe_id, step_id)): Path<(String, String)>,
) -> std::result::Result<Json<Envelope>, ApiError> {
    let (recipe_id, step_id) = parse_ids(&recipe_id, &step_id)?;
    state.recipes.delete_step(recipe_id, step_id).await?;

    Ok(Json(Envelope::ok("Paso eliminado correctamente.")))
}
