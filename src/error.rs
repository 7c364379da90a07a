//! Error types for the intake service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::secrets::SecretError;

/// Errors surfaced to the caller as a status code plus a plain-text body.
///
/// The first failure in a request aborts the remaining steps; there are no
/// retries. Responses carry the immediate message only, never a cause chain.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// A required card field is absent or empty.
    #[error("invalid request, all fields are mandatory")]
    MissingFields,

    /// The request body is not a valid card request.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Credential retrieval failed.
    #[error(transparent)]
    Secrets(#[from] SecretError),

    /// A Trello API call failed; the underlying text is surfaced as-is.
    #[error("{0}")]
    Api(String),
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields | Self::InvalidBody(_) | Self::Api(_) => StatusCode::BAD_REQUEST,
            Self::Secrets(err) => match err {
                // A credential file the platform should have mounted is
                // missing; that is an infrastructure failure, not a request
                // problem.
                SecretError::Unreadable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SecretError::NotConfigured | SecretError::NotFound => StatusCode::BAD_REQUEST,
            },
        };
        (status, self.to_string()).into_response()
    }
}
