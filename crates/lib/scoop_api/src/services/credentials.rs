//! HTTP Basic credentials.

use axum::http::{HeaderMap, header::AUTHORIZATION};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::AppError;

/// Username and password taken from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Parse basic-auth credentials.
///
/// No header (or a non-Basic scheme) is [`AppError::CredentialsRejected`] so
/// the client gets the challenge; an undecodable payload is a bad request.
pub fn basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Err(AppError::CredentialsRejected);
    };
    let value = value
        .to_str()
        .map_err(|_| AppError::BadRequest("Malformed authorization header".into()))?;
    let Some(encoded) = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("basic"))
        .map(|(_, rest)| rest.trim())
    else {
        return Err(AppError::CredentialsRejected);
    };

    let decoded = STANDARD
        .decode(encoded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| AppError::BadRequest("Malformed authorization header".into()))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::BadRequest("Malformed authorization header".into()))?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
