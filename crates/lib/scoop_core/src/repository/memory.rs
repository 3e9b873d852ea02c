//! In-memory repositories for tests and the development mode.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{ProductRepository, UserRepository};
use crate::error::{CoreError, CoreResult};
use crate::models::product::{Product, ProductPatch};
use crate::models::user::User;

/// Users held in a concurrent map. Inserts are atomic per username.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<String, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get(&self, username: &str) -> CoreResult<User> {
        self.users
            .get(username)
            .map(|u| u.value().clone())
            .ok_or_else(|| CoreError::NotFound(format!("user {username}")))
    }

    async fn create(&self, user: &User) -> CoreResult<()> {
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(CoreError::Conflict(format!(
                "duplicate username {}",
                user.username
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }
}

/// Products held in a concurrent map.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: DashMap<String, Product>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn get(&self, product_id: &str) -> CoreResult<Product> {
        self.products
            .get(product_id)
            .map(|p| p.value().clone())
            .ok_or_else(|| CoreError::NotFound(format!("product {product_id}")))
    }

    async fn create(&self, product: &Product) -> CoreResult<()> {
        match self.products.entry(product.product_id.clone()) {
            Entry::Occupied(_) => Err(CoreError::Conflict(format!(
                "duplicate product {}",
                product.product_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(product.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, product_id: &str, patch: &ProductPatch) -> CoreResult<()> {
        let mut product = self
            .products
            .get_mut(product_id)
            .ok_or_else(|| CoreError::NotFound(format!("product {product_id}")))?;
        patch.clone().apply(product.value_mut());
        Ok(())
    }

    async fn delete(&self, product_id: &str) -> CoreResult<()> {
        self.products
            .remove(product_id)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound(format!("product {product_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            username: name.into(),
            password_hash: "hash".into(),
            grants: vec![],
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.create(&user("alice")).await.unwrap();
        let err = repo.create(&user("alice")).await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let repo = MemoryProductRepository::new();
        assert!(matches!(repo.get("1").await, Err(CoreError::NotFound(_))));
        assert!(matches!(
            repo.update("1", &ProductPatch::default()).await,
            Err(CoreError::NotFound(_))
        ));
        assert!(matches!(repo.delete("1").await, Err(CoreError::NotFound(_))));
    }
}
