//! Request and response bodies.

use scoop_core::models::product::{Product, ProductPatch};
use serde::{Deserialize, Serialize};

/// `{"message": ...}` body used for every status-only reply and every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Product as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub name: String,
    pub image_closed: String,
    pub image_open: String,
    pub description: String,
    pub story: String,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub allergy_info: String,
    pub dietary_certifications: String,
}

impl From<Product> for ProductData {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id,
            name: p.name,
            image_closed: p.image_closed_url,
            image_open: p.image_open_url,
            description: p.description,
            story: p.story,
            sourcing_values: p.sourcing_values,
            ingredients: p.ingredients,
            allergy_info: p.allergy_info,
            dietary_certifications: p.dietary_certification,
        }
    }
}

/// `GET /api/products/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSingleResponse {
    pub product: ProductData,
}

/// `POST /api/products/` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductCreateRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub name: String,
    pub image_closed: String,
    pub image_open: String,
    pub description: String,
    pub story: String,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub allergy_info: String,
    pub dietary_certifications: String,
}

impl From<ProductCreateRequest> for Product {
    fn from(r: ProductCreateRequest) -> Self {
        Product {
            product_id: r.product_id,
            name: r.name,
            image_closed_url: r.image_closed,
            image_open_url: r.image_open,
            description: r.description,
            story: r.story,
            sourcing_values: r.sourcing_values,
            ingredients: r.ingredients,
            allergy_info: r.allergy_info,
            dietary_certification: r.dietary_certifications,
        }
    }
}

/// `PUT /api/products/{id}` body. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductUpdateRequest {
    pub name: Option<String>,
    pub image_closed: Option<String>,
    pub image_open: Option<String>,
    pub description: Option<String>,
    pub story: Option<String>,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub allergy_info: Option<String>,
    pub dietary_certifications: Option<String>,
}

impl From<ProductUpdateRequest> for ProductPatch {
    /// Empty strings mean "unchanged", the same as an omitted field.
    fn from(r: ProductUpdateRequest) -> Self {
        ProductPatch {
            name: non_empty(r.name),
            image_closed_url: non_empty(r.image_closed),
            image_open_url: non_empty(r.image_open),
            description: non_empty(r.description),
            story: non_empty(r.story),
            sourcing_values: r.sourcing_values,
            ingredients: r.ingredients,
            allergy_info: non_empty(r.allergy_info),
            dietary_certification: non_empty(r.dietary_certifications),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
