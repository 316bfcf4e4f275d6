//! Application error type and its mapping onto the JSON response envelope.
//!
//! Every failure is a 4xx with `status: 0`. Business failures carry little or
//! no detail; internal faults are logged and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::users::{dto::ApiEnvelope, repo::StoreError};

pub const FAILURE_MESSAGE: &str = "failure";
pub const FAULT_MESSAGE: &str = "Failed!";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidCredentials
            | AppError::NotFound
            | AppError::Store(_)
            | AppError::Internal(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn envelope(&self) -> ApiEnvelope {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) => {
                ApiEnvelope::failure(FAILURE_MESSAGE).with_value(msg.clone())
            }
            AppError::InvalidCredentials | AppError::NotFound => {
                ApiEnvelope::failure(FAILURE_MESSAGE)
            }
            AppError::Unauthorized(reason) => ApiEnvelope::failure(*reason),
            AppError::Store(e) => {
                error!(error = %e, "store fault");
                ApiEnvelope::failure(FAULT_MESSAGE)
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal fault");
                ApiEnvelope::failure(FAULT_MESSAGE)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
