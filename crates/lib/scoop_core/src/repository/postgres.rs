//! PostgreSQL repositories.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{ProductRepository, UserRepository};
use crate::error::{CoreError, CoreResult};
use crate::models::auth::Grant;
use crate::models::product::{Product, ProductPatch};
use crate::models::user::User;

/// Users stored in the `users` table.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get(&self, username: &str) -> CoreResult<User> {
        let (username, password_hash, grants) =
            sqlx::query_as::<_, (String, String, Json<Vec<Grant>>)>(
                "SELECT username, password_hash, grants FROM users WHERE username = $1",
            )
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(User {
            username,
            password_hash,
            grants: grants.0,
        })
    }

    async fn create(&self, user: &User) -> CoreResult<()> {
        sqlx::query("INSERT INTO users (username, password_hash, grants) VALUES ($1, $2, $3)")
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(Json(&user.grants))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: String,
    name: String,
    image_closed_url: String,
    image_open_url: String,
    description: String,
    story: String,
    sourcing_values: Option<Vec<String>>,
    ingredients: Option<Vec<String>>,
    allergy_info: String,
    dietary_certification: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            product_id: row.product_id,
            name: row.name,
            image_closed_url: row.image_closed_url,
            image_open_url: row.image_open_url,
            description: row.description,
            story: row.story,
            sourcing_values: row.sourcing_values,
            ingredients: row.ingredients,
            allergy_info: row.allergy_info,
            dietary_certification: row.dietary_certification,
        }
    }
}

/// Products stored in the `products` table.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get(&self, product_id: &str) -> CoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT product_id, name, image_closed_url, image_open_url, description, story, \
                    sourcing_values, ingredients, allergy_info, dietary_certification \
             FROM products WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn create(&self, product: &Product) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO products (product_id, name, image_closed_url, image_open_url, \
                                   description, story, sourcing_values, ingredients, \
                                   allergy_info, dietary_certification) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&product.product_id)
        .bind(&product.name)
        .bind(&product.image_closed_url)
        .bind(&product.image_open_url)
        .bind(&product.description)
        .bind(&product.story)
        .bind(&product.sourcing_values)
        .bind(&product.ingredients)
        .bind(&product.allergy_info)
        .bind(&product.dietary_certification)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, product_id: &str, patch: &ProductPatch) -> CoreResult<()> {
        let result = sqlx::query(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                image_closed_url = COALESCE($3, image_closed_url), \
                image_open_url = COALESCE($4, image_open_url), \
                description = COALESCE($5, description), \
                story = COALESCE($6, story), \
                sourcing_values = COALESCE($7, sourcing_values), \
                ingredients = COALESCE($8, ingredients), \
                allergy_info = COALESCE($9, allergy_info), \
                dietary_certification = COALESCE($10, dietary_certification) \
             WHERE product_id = $1",
        )
        .bind(product_id)
        .bind(&patch.name)
        .bind(&patch.image_closed_url)
        .bind(&patch.image_open_url)
        .bind(&patch.description)
        .bind(&patch.story)
        .bind(&patch.sourcing_values)
        .bind(&patch.ingredients)
        .bind(&patch.allergy_info)
        .bind(&patch.dietary_certification)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("product {product_id}")));
        }
        Ok(())
    }

    async fn delete(&self, product_id: &str) -> CoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("product {product_id}")));
        }
        Ok(())
    }
}
