//! Error responses
//!
//! Mutation endpoints always answer with the JSON envelope
//! `{success: false, message}`; page endpoints render the HTML error view.
//! Server-side causes are logged and replaced with a generic message.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cocina_common::{Error, ValidationError};
use thiserror::Error as ThisError;
use tracing::error;

use super::envelope::Envelope;
use crate::views::{render, View};

/// Message shown for any 5xx condition
pub const INTERNAL_MESSAGE: &str = "Ha ocurrido un error interno en el servidor.";

/// Error returned by JSON endpoints
#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] Error),

    /// Request body could not be decoded
    #[error("Solicitud no válida: {0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Catalog(Error::Validation(err))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ValidationError::ImageTooLarge.into()
        } else {
            ApiError::BadRequest(err.body_text())
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(err) => status_of(err),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            INTERNAL_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}

/// Error returned by HTML page endpoints
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(err: Error) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let message = if status.is_server_error() {
            error!("Page failed: {}", self.0);
            INTERNAL_MESSAGE.to_string()
        } else {
            self.0.to_string()
        };

        let html = render(View::Error {
            status: status.as_u16(),
            message: &message,
        });
        (status, Html(html)).into_response()
    }
}

/// HTTP status for a catalog error
pub fn status_of(err: &Error) -> StatusCode {
    match err {
        Error::Validation(_) | Error::DuplicateName(_) | Error::InvalidId(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Database(_)
        | Error::Io(_)
        | Error::Config(_)
        | Error::Storage(_)
        | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(&Error::Validation(ValidationError::MissingFields)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(&Error::DuplicateName("Tarta".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(&Error::recipe_not_found()), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(&Error::InvalidId("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(&Error::Storage("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response = ApiError::from(Error::Internal("secret path /var/x".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }
}
