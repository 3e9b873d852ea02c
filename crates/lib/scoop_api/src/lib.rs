//! # scoop_api
//!
//! HTTP API library for Scoop.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::extract::FromRef;
use axum::http::Method;
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;
use scoop_core::auth::password::CredentialHasher;
use scoop_core::repository::{ProductRepository, UserRepository};
use scoop_core::service::product::ProductService;
use scoop_core::service::user::UserService;
use scoop_core::session::{SessionCache, TokenStore};
use scoop_core::validation::Validator;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::handlers::{health, products, users};
use crate::middleware::permission::{ProtectedRoutes, RouteTableError};
use crate::routes::names;
use crate::services::cookies::cookie_key;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    pub users: UserService,
    pub products: ProductService,
    pub sessions: TokenStore,
    /// Validation rules, compiled once at startup.
    pub validator: Arc<Validator>,
    /// Session cookie signing key.
    pub cookie_key: Key,
}

impl AppState {
    /// Assemble the state from its backends.
    pub fn new(
        config: ApiConfig,
        user_repo: Arc<dyn UserRepository>,
        product_repo: Arc<dyn ProductRepository>,
        cache: Arc<dyn SessionCache>,
    ) -> Result<Self, StartupError> {
        let hasher = CredentialHasher::new(config.bcrypt_cost)?;
        let validator = Validator::new();
        Ok(Self {
            users: UserService::new(config.app_name.clone(), user_repo, hasher),
            products: ProductService::new(product_repo),
            sessions: TokenStore::new(cache),
            validator: Arc::new(validator),
            cookie_key: cookie_key(&config.session_secret),
            config,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Run embedded database migrations.
///
/// Delegates to `scoop_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    scoop_core::migrate::migrate(pool).await
}

/// The product routes and the role each one requires.
pub fn protected_routes() -> Result<ProtectedRoutes, RouteTableError> {
    ProtectedRoutes::new()
        .route(
            names::PRODUCT_GET,
            Method::GET,
            routes::PRODUCTS_ID,
            products::get_product_handler,
        )?
        .route(
            names::PRODUCT_UPDATE,
            Method::PUT,
            routes::PRODUCTS_ID,
            products::update_product_handler,
        )?
        .route(
            names::PRODUCT_DELETE,
            Method::DELETE,
            routes::PRODUCTS_ID,
            products::delete_product_handler,
        )?
        .route(
            names::PRODUCT_CREATE,
            Method::POST,
            routes::PRODUCTS,
            products::create_product_handler,
        )
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Result<Router, StartupError> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no session required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health))
        .route(routes::POST_USERS_SIGNUP, post(users::signup_handler))
        .route(routes::POST_USERS_ADMIN, post(users::admin_signup_handler))
        .route(routes::POST_USERS_LOGIN, post(users::login_handler));

    // Protected routes (session, then grant check)
    let protected = protected_routes()?.build(&state);

    Ok(Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}
