//! Request-layer errors and their HTTP status mapping

use serde_json::json;
use thiserror::Error;

use crate::error::EngineError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value for parameter {name}: {value:?}")]
    InvalidParameter { name: String, value: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Method {method} not allowed on {path}")]
    MethodNotAllowed { method: String, path: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::InvalidParameter { .. }
            | ApiError::MalformedBody(_) => 400,
            ApiError::Engine(e) if e.is_client_error() => 400,
            ApiError::Engine(_) => 500,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed { .. } => 405,
            ApiError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(_) => "MissingParameter",
            ApiError::InvalidParameter { .. } => "InvalidParameter",
            ApiError::MalformedBody(_) => "MalformedBody",
            ApiError::Engine(EngineError::InvalidAssumptions(_)) => "InvalidAssumptions",
            ApiError::Engine(EngineError::InvalidMilestone { .. }) => "InvalidMilestone",
            ApiError::Engine(EngineError::InvalidTransaction { .. }) => "InvalidTransaction",
            ApiError::Engine(EngineError::InvalidPeriodFormat(_)) => "InvalidPeriodFormat",
            ApiError::NotFound(_) => "NotFound",
            ApiError::MethodNotAllowed { .. } => "MethodNotAllowed",
            ApiError::Internal(_) => "Internal",
        }
    }

    /// `{ "error": message, "kind": kind }`
    pub fn to_body(&self) -> String {
        json!({
            "error": self.to_string(),
            "kind": self.kind(),
        })
        .to_string()
    }
}
