//! Session secret resolution.

use std::path::{Path, PathBuf};

use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

/// Resolve the session secret: explicit value → persisted file → generated.
///
/// A generated secret is written to `path` so signed cookies survive a
/// restart.
pub fn resolve_session_secret(explicit: Option<&str>, path: &Path) -> String {
    if let Some(secret) = explicit
        && !secret.is_empty()
    {
        return secret.to_string();
    }
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::write(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new session secret"),
        Err(e) => warn!(path = %path.display(), "could not persist session secret: {e}"),
    }
    secret
}

/// Path to the persisted session secret file.
pub fn default_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scoop")
        .join("session-secret")
}
