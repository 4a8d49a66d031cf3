//! Error types for the pedigree client
//!
//! `ApiError` covers everything that can go wrong talking to the REST
//! backend; `PedigreeError` is what component operations return.

use pedigree_types::ErrorPayload;
use thiserror::Error;

use crate::validator::{format_error_with_list, FieldError};

/// Message shown whenever no response could be obtained from the backend
pub const CONNECTION_FAILED: &str = "Connection to the server failed.";

/// Failures of a single REST call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// No response reachable (refused, DNS, timeout)
    #[error("Connection to the server failed. ({detail})")]
    Connection { detail: String },

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {}", server_summary(.payload, .body))]
    Server {
        status: u16,
        payload: Option<ErrorPayload>,
        body: String,
    },

    /// Response arrived but could not be decoded
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Request could not be built from the given record; nothing was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn connection(detail: impl Into<String>) -> Self {
        ApiError::Connection {
            detail: detail.into(),
        }
    }

    /// Server error carrying a structured payload
    pub fn server(status: u16, payload: ErrorPayload) -> Self {
        let body = serde_json::to_string(&payload).unwrap_or_default();
        ApiError::Server {
            status,
            payload: Some(payload),
            body,
        }
    }

    /// Build from a status and raw body, picking up an `ErrorPayload` if the body is one
    pub fn from_response(status: u16, body: String) -> Self {
        let payload = serde_json::from_str::<ErrorPayload>(&body).ok();
        ApiError::Server {
            status,
            payload,
            body,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, ApiError::Connection { .. })
    }

    /// Text presented to the user in an error notification
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Connection { .. } => CONNECTION_FAILED.to_string(),
            ApiError::Server {
                payload: Some(payload),
                ..
            } => format_error_with_list(payload),
            ApiError::Server { status, body, .. } if body.trim().is_empty() => {
                format!("Server responded with status {}", status)
            }
            ApiError::Server { body, .. } => body.clone(),
            ApiError::Decode(message) | ApiError::InvalidRequest(message) => message.clone(),
        }
    }
}

fn server_summary<'a>(payload: &'a Option<ErrorPayload>, body: &'a str) -> &'a str {
    payload.as_ref().map(|p| p.message.as_str()).unwrap_or(body)
}

fn describe_fields(fields: &[(&'static str, FieldError)]) -> String {
    fields
        .iter()
        .map(|(field, err)| format!("{}: {}", field, err))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for REST calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Errors returned by component operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PedigreeError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Client-side validation failed; nothing was sent
    #[error("Form is invalid: {}", describe_fields(.0))]
    Validation(Vec<(&'static str, FieldError)>),

    /// Operation needs a persisted record but the form has none
    #[error("No {0} loaded")]
    NotLoaded(&'static str),

    /// Operation not allowed in the current form mode
    #[error("Operation not available in {0} mode")]
    WrongMode(&'static str),
}

pub type Result<T> = std::result::Result<T, PedigreeError>;
