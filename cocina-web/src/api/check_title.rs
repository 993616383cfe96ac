//! Duplicate-name probe used by the form's live validation

use axum::extract::{Query, State};
use axum::Json;
use cocina_common::uuid_utils::parse_id;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckTitleQuery {
    #[serde(default)]
    pub title: String,
    /// Recipe being edited, excluded from the comparison
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckTitleResponse {
    pub exists: bool,
}

/// GET /api/check-title?title&id
pub async fn check_title(
    State(state): State<AppState>,
    Query(query): Query<CheckTitleQuery>,
) -> Result<Json<CheckTitleResponse>, ApiError> {
    let exclude = match query.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(parse_id(id)?),
        _ => None,
    };
    let exists = state.recipes.name_exists(&query.title, exclude).await?;
    Ok(Json(CheckTitleResponse { exists }))
}
