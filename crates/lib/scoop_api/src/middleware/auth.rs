//! Authentication middleware: signed session cookie to [`Identity`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use scoop_core::auth::AuthError;
use scoop_core::models::auth::Identity;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::{SessionCookie, session_token};

/// Identity resolved for the current request, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Body for missing, expired or unreadable sessions.
pub const SESSION_EXPIRED: &str = "Session timeout. Please relogin";

/// Axum middleware: reads the `session_token` cookie, resolves it once
/// against the token store, and injects `AuthenticatedUser` into request
/// extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match session_token(request.headers(), &state.cookie_key)? {
        SessionCookie::Present(token) => token,
        SessionCookie::Absent => return Err(AppError::Unauthorized("Unauthorized".into())),
    };

    let identity = match state.sessions.resolve(&token).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            debug!("session not found or expired");
            return Err(AppError::Unauthorized(SESSION_EXPIRED.into()));
        }
        Err(AuthError::CorruptSession(detail)) => {
            warn!("discarding corrupt session: {detail}");
            return Err(AppError::Unauthorized(SESSION_EXPIRED.into()));
        }
        Err(e) => return Err(e.into()),
    };

    request.extensions_mut().insert(AuthenticatedUser(identity));
    Ok(next.run(request).await)
}
