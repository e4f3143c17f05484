use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{response::ErrorResponse, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("product not found")]
    NotFound,

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("storage unavailable")]
    Storage(#[from] sea_orm::DbErr),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("product not found"),
            ),
            AppError::Validation(errors) => {
                tracing::debug!(%errors, "rejected product fields");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("validation failed")
                        .with_error(errors.to_string())
                        .with_field_errors(errors),
                )
            }
            AppError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("invalid request body").with_error(detail),
            ),
            AppError::Storage(err) => {
                tracing::error!(error = ?err, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal server error").with_error("storage unavailable"),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
