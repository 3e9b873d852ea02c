//! Product catalog operations.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{REPOSITORY_TIMEOUT, bounded};
use crate::error::CoreResult;
use crate::models::product::{Product, ProductPatch};
use crate::repository::ProductRepository;

/// Manages products in the catalog repository.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    timeout: Duration,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            repo,
            timeout: REPOSITORY_TIMEOUT,
        }
    }

    /// Override the per-call repository timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn get_product(&self, product_id: &str) -> CoreResult<Product> {
        bounded(self.timeout, self.repo.get(product_id)).await
    }

    pub async fn create_product(&self, product: &Product) -> CoreResult<()> {
        bounded(self.timeout, self.repo.create(product)).await?;
        info!(product_id = %product.product_id, "created product");
        Ok(())
    }

    pub async fn update_product(&self, product_id: &str, patch: &ProductPatch) -> CoreResult<()> {
        bounded(self.timeout, self.repo.update(product_id, patch)).await
    }

    pub async fn delete_product(&self, product_id: &str) -> CoreResult<()> {
        bounded(self.timeout, self.repo.delete(product_id)).await?;
        info!(product_id, "deleted product");
        Ok(())
    }
}
