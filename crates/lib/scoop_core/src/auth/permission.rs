//! Grant checks against a required role.

use super::role::Role;
use crate::models::auth::Identity;

/// Returns `true` when `identity` holds `required` for `app_name`.
///
/// A missing identity has no grants, and a missing requirement is never
/// satisfied.
pub fn is_authorized(identity: Option<&Identity>, app_name: &str, required: Option<Role>) -> bool {
    let Some(required) = required else {
        return false;
    };
    let Some(identity) = identity else {
        return false;
    };
    identity
        .grants
        .iter()
        .any(|g| g.app_name == app_name && g.role == required)
}
