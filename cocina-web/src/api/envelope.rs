//! JSON envelope shared by all mutation endpoints
//!
//! `{success, message, ...extra}`: the extra fields are flattened into the
//! top-level object so the client can patch the page without a reload.

use cocina_common::{Step, StepContent};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = NoExtra> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub extra: T,
}

/// Envelope with nothing beyond `success` and `message`
#[derive(Debug, Default, Serialize)]
pub struct NoExtra {}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::with(message, NoExtra {})
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            message: message.into(),
            extra: NoExtra {},
        }
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn with(message: impl Into<String>, extra: T) -> Self {
        Envelope {
            success: true,
            message: message.into(),
            extra,
        }
    }
}

/// Where the client should navigate after a recipe mutation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub redirect_url: String,
}

impl Redirect {
    pub fn to(url: impl Into<String>) -> Self {
        Self {
            redirect_url: url.into(),
        }
    }

    pub fn to_recipe(id: Uuid) -> Self {
        Self::to(format!("/receta/{}", id))
    }
}

/// Newly created step and its owning recipe
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepCreated {
    pub step: Step,
    pub recipe_id: Uuid,
}

/// Updated step content; id and order are already known to the client
#[derive(Debug, Serialize)]
pub struct StepUpdated {
    pub step: StepContent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_are_flattened() {
        let value = serde_json::to_value(Envelope::with("ok", Redirect::to("/"))).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "ok", "redirectUrl": "/"})
        );
    }

    #[test]
    fn test_plain_envelope() {
        let value = serde_json::to_value(Envelope::ok("hecho")).unwrap();
        assert_eq!(value, json!({"success": true, "message": "hecho"}));
    }
}
