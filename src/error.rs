//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config read: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse: {0}")]
    Parse(String),
    #[error("model '{model}': field #{index} has no name")]
    MissingFieldName { model: String, index: usize },
    #[error("model '{model}': field '{field}' has no type")]
    MissingFieldType { model: String, field: String },
    #[error("model '{model}': field '{field}' has unknown type '{type_name}'")]
    UnknownFieldType {
        model: String,
        field: String,
        type_name: String,
    },
    #[error("model '{model}': duplicate field '{field}'")]
    DuplicateField { model: String, field: String },
    #[error("model '{model}': field '{field}' is reserved")]
    ReservedField { model: String, field: String },
    #[error("duplicate model: {0}")]
    DuplicateModel(String),
    #[error("invalid model name: '{0}'")]
    InvalidModelName(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model name '{0}' is not a valid path segment")]
    InvalidPathSegment(String),
    #[error("duplicate path: {0}")]
    DuplicatePath(String),
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Generation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "generation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let (status, code) = AppError::NotFound("task".into()).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "not_found");
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = AppError::Conflict("task '42' already exists".into());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "conflict");
        assert!(!status.is_server_error());
    }

    #[test]
    fn config_error_is_transparent() {
        let err: AppError = ConfigError::DuplicateModel("task".into()).into();
        assert_eq!(err.to_string(), "duplicate model: task");
        assert_eq!(err.status_and_code().1, "config_error");
    }
}
