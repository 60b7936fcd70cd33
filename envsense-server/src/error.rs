// Envsense Server - Error types
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! Request and bootstrap errors.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use envsense::EnvsenseError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Query or path parameter that cannot be parsed
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Body that is not valid JSON for the endpoint
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Core rejected the input
    #[error(transparent)]
    Core(#[from] EnvsenseError),

    /// Metrics could not be encoded
    #[error("Metrics encoding failed: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter { .. } | Self::InvalidBody(_) | Self::Core(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Errors while starting the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration file could not be read
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_json::Error,
    },

    /// Listener could not be bound or the server failed
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
