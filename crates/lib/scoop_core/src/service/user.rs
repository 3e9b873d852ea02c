//! User registration and login.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use super::{REPOSITORY_TIMEOUT, bounded};
use crate::auth::password::CredentialHasher;
use crate::auth::role::Role;
use crate::error::{CoreError, CoreResult};
use crate::models::auth::Grant;
use crate::models::user::User;
use crate::repository::UserRepository;

/// Registers users and checks their credentials.
#[derive(Clone)]
pub struct UserService {
    app_name: String,
    repo: Arc<dyn UserRepository>,
    hasher: CredentialHasher,
    timeout: Duration,
}

impl UserService {
    pub fn new(
        app_name: impl Into<String>,
        repo: Arc<dyn UserRepository>,
        hasher: CredentialHasher,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            repo,
            hasher,
            timeout: REPOSITORY_TIMEOUT,
        }
    }

    /// Override the per-call repository timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Grants issued to a new account.
    fn default_grants(&self, is_admin: bool) -> Vec<Grant> {
        let roles: &[Role] = if is_admin { &Role::ALL } else { &[Role::Read] };
        roles
            .iter()
            .map(|role| Grant::new(self.app_name.clone(), *role))
            .collect()
    }

    /// Create an account. Admin accounts receive READ, WRITE and DELETE.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        is_admin: bool,
    ) -> CoreResult<User> {
        match bounded(self.timeout, self.repo.get(username)).await {
            Ok(_) => return Err(CoreError::Conflict(format!("username {username} is taken"))),
            Err(CoreError::NotFound(_)) => {}
            Err(e) => return Err(CoreError::Internal(e.to_string())),
        }

        let password_hash = self.hash(password).await?;
        let user = User {
            username: username.to_string(),
            password_hash,
            grants: self.default_grants(is_admin),
        };

        match bounded(self.timeout, self.repo.create(&user)).await {
            Ok(()) => {}
            Err(CoreError::Conflict(msg)) => {
                debug!(username, "registration lost a race: {msg}");
                return Err(CoreError::Conflict(format!("username {username} is taken")));
            }
            Err(e) => return Err(e),
        }

        info!(username, is_admin, "registered user");
        Ok(user)
    }

    /// Check credentials and return the stored user.
    ///
    /// Unknown users surface as [`CoreError::NotFound`] and wrong passwords as
    /// [`CoreError::AuthFail`]; callers must present both identically.
    pub async fn login_user(&self, username: &str, password: &str) -> CoreResult<User> {
        let user = bounded(self.timeout, self.repo.get(username)).await?;

        if !self.verify(&user.password_hash, password).await? {
            debug!(username, "password mismatch");
            return Err(CoreError::AuthFail);
        }
        Ok(user)
    }

    async fn hash(&self, password: &str) -> CoreResult<String> {
        let hasher = self.hasher;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| CoreError::Internal(format!("hash task: {e}")))?
            .map_err(CoreError::from)
    }

    async fn verify(&self, hash: &str, password: &str) -> CoreResult<bool> {
        let hasher = self.hasher;
        let hash = hash.to_string();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &password))
            .await
            .map_err(|e| CoreError::Internal(format!("verify task: {e}")))
    }
}
