// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::services::persistence::PersistenceError;

/// Rejected workout input. The store is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),

    #[error("{0} must be a positive number")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} must be a whole number")]
    NotInteger(&'static str),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),

    #[error("{0} is required for this workout type")]
    MissingField(&'static str),

    #[error("Unknown workout type: {0}")]
    UnknownKind(String),
}

impl ValidationError {
    /// Name of the input field that violated its constraint.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::NonFinite(f)
            | ValidationError::NotPositive(f)
            | ValidationError::Negative(f)
            | ValidationError::NotInteger(f)
            | ValidationError::OutOfRange(f)
            | ValidationError::MissingField(f) => f,
            ValidationError::UnknownKind(_) => "type",
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid workout: {0}")]
    Validation(#[from] ValidationError),

    #[error("Workout not found: {0}")]
    NotFound(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        AppError::PersistenceUnavailable(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details, field) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(err.to_string()),
                Some(err.field().to_string()),
            ),
            AppError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                Some(format!("No workout with id {}", id)),
                None,
            ),
            AppError::LocationUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "location_unavailable",
                Some(msg.clone()),
                None,
            ),
            AppError::PersistenceUnavailable(msg) => {
                tracing::error!(error = %msg, "Persistence error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "persistence_unavailable",
                    None,
                    None,
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                Some(msg.clone()),
                None,
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    None,
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            field,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
