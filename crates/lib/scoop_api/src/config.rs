//! API server configuration.

use std::fmt;
use std::str::FromStr;

use scoop_core::auth::password::DEFAULT_COST;
use scoop_core::auth::secret::{default_secret_path, resolve_session_secret};

/// Default application name grants are scoped to.
pub const DEFAULT_APP_NAME: &str = "BenJerry";

/// Default session lifetime: 8 minutes.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 480;

/// Deployment environment tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the API server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL, including the database name.
    pub database_url: String,
    /// Redis connection URL for the session cache.
    pub redis_url: String,
    /// Deployment environment.
    pub environment: Environment,
    /// Application name that grants are scoped to.
    pub app_name: String,
    /// Secret the session cookie signing key is derived from.
    pub session_secret: String,
    /// Session token and cookie lifetime in seconds.
    pub session_ttl_secs: u64,
    /// bcrypt cost factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                                  |
    /// |--------------------|------------------------------------------|
    /// | `HOST` / `PORT`    | `0.0.0.0` / `8080`                       |
    /// | `DATABASE_URL`     | `postgres://localhost:5432/scoop`        |
    /// | `DATABASE_NAME`    | name in `DATABASE_URL`                   |
    /// | `REDIS_URL`        | `redis://localhost:6379`                 |
    /// | `ENV_MODE`         | `development`                            |
    /// | `APP_NAME`         | `BenJerry`                               |
    /// | `SESSION_SECRET`   | generated & persisted to file            |
    /// | `SESSION_TTL_SECS` | `480`                                    |
    /// | `BCRYPT_COST`      | `12`                                     |
    pub fn from_env() -> Result<Self, String> {
        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("PORT", "8080");

        let mut database_url = env_or("DATABASE_URL", "postgres://localhost:5432/scoop");
        if let Ok(name) = std::env::var("DATABASE_NAME")
            && !name.is_empty()
        {
            database_url = with_database_name(&database_url, &name)?;
        }

        let session_secret = resolve_session_secret(
            std::env::var("SESSION_SECRET").ok().as_deref(),
            &default_secret_path(),
        );

        Ok(Self {
            bind_addr: format!("{host}:{port}"),
            database_url,
            redis_url: env_or("REDIS_URL", "redis://localhost:6379"),
            environment: env_or("ENV_MODE", "development").parse()?,
            app_name: env_or("APP_NAME", DEFAULT_APP_NAME),
            session_secret,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            bcrypt_cost: parse_env("BCRYPT_COST", DEFAULT_COST)?,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            database_url: "postgres://localhost:5432/scoop".into(),
            redis_url: "redis://localhost:6379".into(),
            environment: Environment::Development,
            app_name: DEFAULT_APP_NAME.into(),
            session_secret: "scoop-development-session-secret".into(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("redis_url", &self.redis_url)
            .field("environment", &self.environment)
            .field("app_name", &self.app_name)
            .field("session_secret", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, String>
where
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => v.parse().map_err(|e| format!("{key}: {e}")),
        _ => Ok(default),
    }
}

/// Replace the database name (URL path) in a connection URL.
pub fn with_database_name(database_url: &str, name: &str) -> Result<String, String> {
    let mut url = url::Url::parse(database_url).map_err(|e| format!("DATABASE_URL: {e}"))?;
    url.set_path(&format!("/{name}"));
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_known_tags() {
        assert_eq!("".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("Staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn database_name_replaces_url_path() {
        let url = with_database_name("postgres://user:pw@db:5432/other", "benjerry").unwrap();
        assert_eq!(url, "postgres://user:pw@db:5432/benjerry");
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", ApiConfig::default());
        assert!(!rendered.contains("scoop-development-session-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
