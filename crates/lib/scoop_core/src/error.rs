//! Domain error taxonomy shared by repositories and services.

use thiserror::Error;

use crate::auth::AuthError;

/// Convenience alias for repository and service results.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors surfaced by repositories and services.
///
/// Backend failures are translated into these variants at the repository
/// boundary; services pass them upward unchanged.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown resource or resource not found: {0}")]
    NotFound(String),

    #[error("Conflicting state: {0}")]
    Conflict(String),

    #[error("Bad or invalid input: {0}")]
    BadInput(String),

    #[error("Invalid credentials")]
    AuthFail,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for CoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => CoreError::NotFound("row not found".into()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                CoreError::Conflict(db.message().to_string())
            }
            _ => CoreError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for CoreError {
    fn from(e: AuthError) -> Self {
        CoreError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = CoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn pool_timeout_maps_to_internal() {
        let err = CoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CoreError::Internal(_)));
    }
}
