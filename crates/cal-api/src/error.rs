//! Error types for cal-api

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Message returned when an event id does not exist
pub const EVENT_NOT_FOUND: &str = "The event doesn't exist!";

/// Message returned for unknown paths
pub const ROUTE_NOT_FOUND: &str =
    "The requested URL was not found on the server.";

/// cal-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Field name to reason, for every field that failed validation
    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<&'static str, String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{}", EVENT_NOT_FOUND)]
    EventNotFound,

    #[error("{}", ROUTE_NOT_FOUND)]
    RouteNotFound,

    #[error("Core error: {0}")]
    Core(#[from] cal_core::Error),
}

impl ApiError {
    /// Validation error for a single field
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation(BTreeMap::from([(field, reason.into())]))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::EventNotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Core(cal_core::Error::EventNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(cal_core::Error::InvalidEvent(_)) => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Validation(fields) => json!(fields),
            Self::BadRequest(reason) => json!(reason),
            Self::EventNotFound | Self::Core(cal_core::Error::EventNotFound(_)) => {
                json!(EVENT_NOT_FOUND)
            }
            Self::RouteNotFound => json!(ROUTE_NOT_FOUND),
            Self::Core(cal_core::Error::InvalidEvent(reason)) => json!({ "event": reason }),
            Self::Core(e) => {
                error!("Internal error: {}", e);
                json!("Internal server error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;
