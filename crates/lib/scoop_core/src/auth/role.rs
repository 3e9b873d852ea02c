//! Roles and the route-name convention that maps operations onto them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A permission a grant can carry for one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Read,
    Write,
    Delete,
}

impl Role {
    /// Every role, in the order admin grants are issued.
    pub const ALL: [Role; 3] = [Role::Read, Role::Write, Role::Delete];

    /// Derive the role a route requires from its logical name.
    ///
    /// `..GET`/`..FETCH` require READ, `..CREATE`/`..UPDATE` require WRITE and
    /// `..DELETE` requires DELETE. Any other name maps to `None`, which no
    /// grant satisfies.
    pub fn for_route_name(route_name: &str) -> Option<Role> {
        if route_name.ends_with("GET") || route_name.ends_with("FETCH") {
            Some(Role::Read)
        } else if route_name.ends_with("CREATE") || route_name.ends_with("UPDATE") {
            Some(Role::Write)
        } else if route_name.ends_with("DELETE") {
            Some(Role::Delete)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Read => "READ",
            Role::Write => "WRITE",
            Role::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
