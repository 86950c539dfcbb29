//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::room::namer::NamingError;
use crate::room::registry::RegistryError;
use crate::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("room service unavailable: {0}")]
    UpstreamUnavailable(RegistryError),

    #[error(transparent)]
    InvalidCredentials(TokenError),

    #[error("no free room name after {attempts} attempts")]
    NameCollisionExhaustion { attempts: usize },
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            // Signing the listing request failed; that's our config, not the upstream.
            RegistryError::Token(e) => AppError::InvalidCredentials(e),
            other => AppError::UpstreamUnavailable(other),
        }
    }
}

impl From<NamingError> for AppError {
    fn from(err: NamingError) -> Self {
        match err {
            NamingError::Registry(e) => e.into(),
            NamingError::Exhausted { attempts } => AppError::NameCollisionExhaustion { attempts },
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::InvalidCredentials(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidCredentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NameCollisionExhaustion { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            AppError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AppError::NameCollisionExhaustion { .. } => "ROOM_NAME_EXHAUSTED",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::UpstreamUnavailable(e) => tracing::warn!(error = %e, "room service failed"),
            _ => tracing::error!(error = %self, "token request failed"),
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
