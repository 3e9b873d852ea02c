//! Account registration and login handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::SignedCookieJar;
use scoop_core::error::CoreError;
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::models::MessageResponse;
use crate::services::cookies::session_cookie;
use crate::services::credentials::basic_credentials;

pub const ACCOUNT_CREATED: &str = "Account created successfully";
pub const USERNAME_TAKEN: &str = "Username is already taken";
pub const LOGIN_SUCCESS: &str = "Login success";

/// `POST /api/users/signup`: create an account with the READ grant.
pub async fn signup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    register(&state, &headers, false).await
}

/// `POST /api/users/admin`: create an account with READ, WRITE and DELETE.
pub async fn admin_signup_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    register(&state, &headers, true).await
}

async fn register(
    state: &AppState,
    headers: &HeaderMap,
    is_admin: bool,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let creds = basic_credentials(headers)?;
    state.validator.credentials(&creds.username, &creds.password)?;

    match state
        .users
        .register_user(&creds.username, &creds.password, is_admin)
        .await
    {
        Ok(user) => {
            info!(username = %user.username, is_admin, "account created");
            Ok((StatusCode::CREATED, Json(MessageResponse::new(ACCOUNT_CREATED))))
        }
        // Kept as 200 so existing clients that check the body keep working.
        Err(CoreError::Conflict(_)) => Ok((
            StatusCode::OK,
            Json(MessageResponse::new(USERNAME_TAKEN)),
        )),
        Err(e) => Err(e.into()),
    }
}

/// `POST /api/users/login`: verify credentials and set the session cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    headers: HeaderMap,
) -> AppResult<(SignedCookieJar, Json<MessageResponse>)> {
    let creds = basic_credentials(&headers)?;

    // No format rules here: every bad pair gets the same 401.
    let user = state
        .users
        .login_user(&creds.username, &creds.password)
        .await
        .map_err(|e| match e {
            CoreError::NotFound(_) | CoreError::AuthFail => AppError::CredentialsRejected,
            other => other.into(),
        })?;

    let ttl = state.config.session_ttl_secs;
    let token = state.sessions.issue(&user.identity(), ttl).await?;
    let cookie = session_cookie(
        &token.value,
        token.expires_in_secs,
        state.config.environment.is_production(),
    );
    info!(username = %user.username, "login");

    Ok((jar.add(cookie), Json(MessageResponse::new(LOGIN_SUCCESS))))
}
