//! Route paths and logical route names.
//!
//! Protected routes are registered under a logical name whose suffix
//! determines the role they require (see [`scoop_core::auth::role::Role::for_route_name`]).

pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_USERS_SIGNUP: &str = "/api/users/signup";
pub const POST_USERS_ADMIN: &str = "/api/users/admin";
pub const POST_USERS_LOGIN: &str = "/api/users/login";

pub const PRODUCTS: &str = "/api/products/";
pub const PRODUCTS_ID: &str = "/api/products/{id}";

/// Logical names of protected routes.
pub mod names {
    pub const PRODUCT_GET: &str = "PRODUCT_GET";
    pub const PRODUCT_CREATE: &str = "PRODUCT_CREATE";
    pub const PRODUCT_UPDATE: &str = "PRODUCT_UPDATE";
    pub const PRODUCT_DELETE: &str = "PRODUCT_DELETE";
}
