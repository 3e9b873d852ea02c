//! Persistence ports for users and products.
//!
//! Implementations translate backend failures into [`CoreError`] so the
//! services never see driver errors.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::models::product::{Product, ProductPatch};
use crate::models::user::User;

/// Storage for user records keyed by username.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user. Missing users are [`CoreError::NotFound`](crate::error::CoreError::NotFound).
    async fn get(&self, username: &str) -> CoreResult<User>;

    /// Insert a user. An existing username is
    /// [`CoreError::Conflict`](crate::error::CoreError::Conflict).
    async fn create(&self, user: &User) -> CoreResult<()>;
}

/// Storage for catalog products keyed by product id.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, product_id: &str) -> CoreResult<Product>;

    async fn create(&self, product: &Product) -> CoreResult<()>;

    /// Apply `patch` to an existing product.
    async fn update(&self, product_id: &str, patch: &ProductPatch) -> CoreResult<()>;

    async fn delete(&self, product_id: &str) -> CoreResult<()>;
}
