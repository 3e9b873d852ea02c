//! Signed session cookie.
//!
//! The cookie value is the raw session token, signed (HMAC) with a key
//! derived from the configured session secret.

use axum::http::{HeaderMap, header::COOKIE};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use time::Duration;

use crate::error::AppError;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Derive the cookie signing key from the session secret.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Build a httpOnly cookie carrying `token`.
pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::seconds(
            i64::try_from(max_age_secs).unwrap_or(i64::MAX),
        ))
        .build()
}

/// Outcome of looking for the session cookie on a request.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionCookie {
    /// No `session_token` cookie was sent.
    Absent,
    /// A verified, non-empty token.
    Present(String),
}

/// Extract and verify the session token from request headers.
///
/// A non-UTF-8 `Cookie` header, an empty value or a bad signature is a
/// [`AppError::BadRequest`].
pub fn session_token(headers: &HeaderMap, key: &Key) -> Result<SessionCookie, AppError> {
    let mut sent = false;
    for value in headers.get_all(COOKIE) {
        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest("Malformed cookie header".into()))?;
        sent |= Cookie::split_parse(raw)
            .filter_map(Result::ok)
            .any(|c| c.name() == SESSION_COOKIE);
    }
    if !sent {
        return Ok(SessionCookie::Absent);
    }

    let jar = SignedCookieJar::from_headers(headers, key.clone());
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::BadRequest("Malformed session cookie".into()))?;
    if cookie.value().is_empty() {
        return Err(AppError::BadRequest("Malformed session cookie".into()));
    }
    Ok(SessionCookie::Present(cookie.value().to_string()))
}
