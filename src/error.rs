//! Error types for Bookcafe server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    StoreFailure = 1,
    NoSuchRecord = 2,
    BadValue = 3,
    MissingFields = 4,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing or invalid fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store failure: {0}")]
    Store(String),
}

impl AppError {
    /// Build a validation error from the names of absent or blank fields
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AppError::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::Validation { fields }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code, fields) = match self {
            AppError::Validation { fields } => {
                (StatusCode::BAD_REQUEST, ErrorCode::MissingFields, Some(fields))
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, None),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchRecord, None),
            AppError::Store(ref msg) => {
                tracing::error!("Store failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StoreFailure, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            fields,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
