//! Authorization middleware and the route permission table.
//!
//! Every protected route is registered under a logical name. The role it
//! requires is derived from that name once, when the route is registered,
//! and looked up again per request by matched method and path template.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Router,
    extract::{MatchedPath, Request, State},
    handler::Handler,
    http::Method,
    middleware::{Next, from_fn_with_state},
    response::Response,
    routing::{MethodFilter, on},
};
use scoop_core::auth::permission::is_authorized;
use scoop_core::auth::role::Role;
use thiserror::Error;
use tower::ServiceBuilder;
use tracing::debug;

use super::auth::{AuthenticatedUser, require_session};
use crate::AppState;
use crate::error::AppError;

/// Body returned when a grant check fails.
pub const NOT_PERMITTED: &str = "Operation not permitted";

/// Errors raised while registering protected routes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("route {0} does not map to a role")]
    NoRequirement(String),

    #[error("route {method} {path} registered twice")]
    Duplicate { method: Method, path: String },

    #[error("unsupported method {0}")]
    UnsupportedMethod(Method),
}

/// A protected route's logical name and the role it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePermission {
    pub name: String,
    pub required: Role,
}

/// Required role per (method, path template).
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    routes: HashMap<(Method, String), RoutePermission>,
}

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` for `method path`. Names that map to no role are
    /// refused.
    pub fn insert(
        &mut self,
        name: &str,
        method: Method,
        path: &str,
    ) -> Result<Role, RouteTableError> {
        let required = Role::for_route_name(name)
            .ok_or_else(|| RouteTableError::NoRequirement(name.to_string()))?;
        let key = (method, path.to_string());
        if self.routes.contains_key(&key) {
            let (method, path) = key;
            return Err(RouteTableError::Duplicate { method, path });
        }
        self.routes.insert(
            key,
            RoutePermission {
                name: name.to_string(),
                required,
            },
        );
        Ok(required)
    }

    pub fn get(&self, method: &Method, path: &str) -> Option<&RoutePermission> {
        self.routes.get(&(method.clone(), path.to_string()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// State of the authorization middleware.
#[derive(Clone)]
pub struct PermissionGuard {
    app_name: Arc<str>,
    table: Arc<PermissionTable>,
}

impl PermissionGuard {
    pub fn new(app_name: &str, table: PermissionTable) -> Self {
        Self {
            app_name: Arc::from(app_name),
            table: Arc::new(table),
        }
    }

    /// Role required by the route a request matched, if it is known.
    pub fn required(&self, method: &Method, path: Option<&str>) -> Option<Role> {
        path.and_then(|p| self.table.get(method, p)).map(|p| p.required)
    }
}

/// Axum middleware: rejects the request with 403 unless the authenticated
/// identity holds the role the matched route requires.
///
/// Must run after [`require_session`]. A route missing from the table or a
/// request without an identity is rejected.
pub async fn require_grant(
    State(guard): State<PermissionGuard>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str);
    let required = guard.required(request.method(), path);
    let identity = request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|u| &u.0);

    if !is_authorized(identity, &guard.app_name, required) {
        debug!(
            subject = identity.map(|i| i.subject_id.as_str()).unwrap_or("-"),
            method = %request.method(),
            path = path.unwrap_or("-"),
            "grant check failed"
        );
        return Err(AppError::Forbidden(NOT_PERMITTED.into()));
    }
    Ok(next.run(request).await)
}

/// Builder for routes behind session authentication and grant checks.
pub struct ProtectedRoutes {
    router: Router<AppState>,
    table: PermissionTable,
}

impl ProtectedRoutes {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            table: PermissionTable::new(),
        }
    }

    /// Register `handler` for `method path` under the logical route `name`.
    pub fn route<H, T>(
        mut self,
        name: &str,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<Self, RouteTableError>
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| RouteTableError::UnsupportedMethod(method.clone()))?;
        self.table.insert(name, method, path)?;
        self.router = self.router.route(path, on(filter, handler));
        Ok(self)
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Attach authentication then authorization to every registered route.
    pub fn build(self, state: &AppState) -> Router<AppState> {
        let guard = PermissionGuard::new(&state.config.app_name, self.table);
        self.router.route_layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(state.clone(), require_session))
                .layer(from_fn_with_state(guard, require_grant)),
        )
    }
}

impl Default for ProtectedRoutes {
    fn default() -> Self {
        Self::new()
    }
}
