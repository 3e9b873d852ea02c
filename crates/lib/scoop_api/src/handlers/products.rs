//! Product catalog handlers. All of them sit behind the session and grant
//! middleware.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use scoop_core::error::CoreError;
use scoop_core::models::product::{Product, ProductPatch};
use tracing::info;

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    MessageResponse, ProductCreateRequest, ProductSingleResponse, ProductUpdateRequest,
};

fn bad_body(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// `GET /api/products/{id}`
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ProductSingleResponse>> {
    let product = state.products.get_product(&product_id).await?;
    Ok(Json(ProductSingleResponse {
        product: product.into(),
    }))
}

/// `POST /api/products/`
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    body: Result<Json<ProductCreateRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = body.map_err(bad_body)?;
    let product = Product::from(body);
    state.validator.new_product(&product)?;

    state
        .products
        .create_product(&product)
        .await
        .map_err(|e| match e {
            CoreError::Conflict(_) => AppError::Conflict("Product already exists".into()),
            other => other.into(),
        })?;
    info!(subject = %identity.subject_id, product_id = %product.product_id, "product created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product created successfully")),
    ))
}

/// `PUT /api/products/{id}`: partial update; omitted fields are kept.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    body: Result<Json<ProductUpdateRequest>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(body) = body.map_err(bad_body)?;
    let patch = ProductPatch::from(body);
    state.validator.product_patch(&patch)?;

    state.products.update_product(&product_id, &patch).await?;
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// `DELETE /api/products/{id}`
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(identity)): Extension<AuthenticatedUser>,
    Path(product_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.products.delete_product(&product_id).await?;
    info!(subject = %identity.subject_id, %product_id, "product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
