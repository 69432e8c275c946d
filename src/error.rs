/*
 * Responsibility
 * - Closed failure taxonomy for bearer-token authorization (AuthFailure)
 * - IntoResponse: 401 + application/json + {"error": "<message>"}
 * - Process-level errors of the binary (AppError)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Why a request was not authorized.
///
/// Every variant is terminal for the request. The `Display` text is the message
/// sent back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AuthFailure {
    #[error("Unauthorized. Token missing")]
    TokenMissing,
    #[error("Unauthorized. Verification key not configured")]
    MissingConfiguration,
    #[error("Unauthorized. Token malformed")]
    TokenMalformed,
    #[error("Unauthorized. Token algorithm mismatch")]
    AlgorithmMismatch,
    #[error("Unauthorized. Token invalid")]
    TokenInvalid,
    #[error("Unauthorized. Token expired")]
    TokenExpired,
    #[error("Unauthorized. Token not yet valid")]
    TokenNotYetValid,
}

impl AuthFailure {
    /// Stable machine-readable name, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TokenMissing => "token_missing",
            Self::MissingConfiguration => "missing_configuration",
            Self::TokenMalformed => "token_malformed",
            Self::AlgorithmMismatch => "algorithm_mismatch",
            Self::TokenInvalid => "token_invalid",
            Self::TokenExpired => "token_expired",
            Self::TokenNotYetValid => "token_not_yet_valid",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        // Json sets `Content-Type: application/json`
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
