//! Recipe pages and recipe mutations

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::Html;
use axum::Json;
use cocina_common::uuid_utils::parse_id;
use cocina_common::Error;

use super::envelope::{Envelope, Redirect};
use super::error::{ApiError, PageError};
use super::forms::RecipeForm;
use crate::views::{render, View};
use crate::AppState;

/// GET /receta/nueva
pub async fn new_recipe_form() -> Html<String> {
    Html(render(View::NewRecipe))
}

/// POST /receta/nueva
pub async fn create_recipe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Envelope<Redirect>>, ApiError> {
    let form = RecipeForm::from_multipart(multipart?).await?;
    let recipe = state
        .recipes
        .create(&form.input, form.image.as_ref())
        .await?;

    Ok(Json(Envelope::with(
        "¡Receta creada con éxito!",
        Redirect::to_recipe(recipe.id),
    )))
}

/// GET /receta/:id
pub async fn show_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let recipe = state.recipes.find_by_id(parse_id(&id)?).await?;
    Ok(Html(render(View::Detail(&recipe))))
}

/// GET /receta/editar/:id
pub async fn edit_recipe_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let recipe = state.recipes.find_by_id(parse_id(&id)?).await?;
    Ok(Html(render(View::EditRecipe(&recipe))))
}

/// POST /receta/editar/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Envelope<Redirect>>, ApiError> {
    let id = parse_id(&id)?;
    let form = RecipeForm::from_multipart(multipart?).await?;
    let recipe = state
        .recipes
        .update(id, &form.input, form.image.as_ref(), form.remove_image)
        .await?;

    Ok(Json(Envelope::with(
        "Receta actualizada correctamente.",
        Redirect::to_recipe(recipe.id),
    )))
}

/// POST /receta/borrar/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Redirect>>, ApiError> {
    let id = parse_id(&id)?;
    if !state.recipes.delete(id).await? {
        return Err(Error::recipe_not_found().into());
    }

    Ok(Json(Envelope::with(
        "Receta eliminada correctamente.",
        Redirect::to("/"),
    )))
}
