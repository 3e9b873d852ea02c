//! Application error types.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use scoop_core::auth::AuthError;
use scoop_core::error::CoreError;
use thiserror::Error;
use tracing::error;

use crate::middleware::permission::RouteTableError;
use crate::models::MessageResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Generic body for rejected credentials. Unknown users and wrong passwords
/// both produce exactly this.
pub const CREDENTIALS_REJECTED: &str = "Unauthorized";

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Basic-auth credentials missing or rejected.
    #[error("Invalid credentials")]
    CredentialsRejected,

    /// Session missing, expired or unreadable.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, m.as_str()),
            AppError::CredentialsRejected => (StatusCode::UNAUTHORIZED, CREDENTIALS_REJECTED),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.as_str()),
            AppError::Forbidden(m) => (StatusCode::FORBIDDEN, m.as_str()),
            AppError::Internal(detail) => {
                error!("internal error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        let body = Json(MessageResponse::new(message));
        let mut response = (status, body).into_response();
        if matches!(self, AppError::CredentialsRejected) {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="scoop""#),
            );
        }
        response
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotFound(_) => {
                AppError::NotFound("Unknown resource or resource not found".into())
            }
            CoreError::Conflict(_) => AppError::Conflict("Conflicting state".into()),
            CoreError::BadInput(msg) => AppError::BadRequest(msg),
            CoreError::AuthFail => AppError::CredentialsRejected,
            CoreError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid password hashing config: {0}")]
    Hasher(#[from] AuthError),

    #[error("invalid route table: {0}")]
    Routes(#[from] RouteTableError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let status = |e: CoreError| AppError::from(e).into_response().status();
        assert_eq!(status(CoreError::NotFound("product 1".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(CoreError::Conflict("dup".into())), StatusCode::CONFLICT);
        assert_eq!(status(CoreError::BadInput("name".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(CoreError::AuthFail), StatusCode::UNAUTHORIZED);
        assert_eq!(status(CoreError::Internal("db".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn rejected_credentials_carry_challenge() {
        let resp = AppError::CredentialsRejected.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(WWW_AUTHENTICATE));
        let resp = AppError::Unauthorized("x".into()).into_response();
        assert!(!resp.headers().contains_key(WWW_AUTHENTICATE));
    }

    #[test]
    fn store_failures_are_internal() {
        let resp = AppError::from(AuthError::StoreUnavailable("refused".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
