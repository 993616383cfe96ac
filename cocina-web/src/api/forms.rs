//! Request body decoding for recipe and step submissions

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use cocina_common::RecipeInput;
use serde::Deserialize;

use super::error::ApiError;
use crate::images::UploadedImage;

/// Multipart field carrying the recipe image
pub const IMAGE_FIELD: &str = "recipeImage";
/// Multipart field requesting the image be reset to the placeholder
pub const REMOVE_IMAGE_FIELD: &str = "removeImageFlag";

/// Decoded recipe form: text fields, optional image, remove-image flag
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub input: RecipeInput,
    pub image: Option<UploadedImage>,
    pub remove_image: bool,
}

impl RecipeForm {
    /// Read every multipart field
    ///
    /// An empty file input (no file chosen) counts as no image. Unknown
    /// fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = RecipeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if original_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image = Some(UploadedImage {
                    original_name,
                    content_type,
                    bytes,
                });
                continue;
            }

            let value = field.text().await?;
            let input = &mut form.input;
            match name.as_str() {
                "name" => input.name = Some(value),
                "description" => input.description = Some(value),
                "ingredients" => input.ingredients = Some(value),
                "category" => input.category = Some(value),
                "difficulty" => input.difficulty = Some(value),
                "preparationTime" => input.preparation_time = Some(value),
                REMOVE_IMAGE_FIELD => form.remove_image = is_truthy(&value),
                _ => {}
            }
        }

        Ok(form)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

/// Step fields as sent by the client
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    #[serde(default)]
    pub step_name: String,
    #[serde(default)]
    pub step_description: String,
}

/// Step body accepted as JSON (inline editing) or as a urlencoded form
/// (fallback page)
#[derive(Debug)]
pub struct StepInput(pub StepPayload);

#[axum::async_trait]
impl<S> FromRequest<S> for StepInput
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim_start().starts_with("application/json"))
            .unwrap_or(false);

        let payload = if is_json {
            let Json(payload) = Json::<StepPayload>::from_request(req, state).await?;
            payload
        } else {
            let Form(payload) = Form::<StepPayload>::from_request(req, state).await?;
            payload
        };

        Ok(StepInput(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_flags() {
        assert!(is_truthy("true"));
        assert!(is_truthy("on"));
        assert!(is_truthy(" 1 "));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
