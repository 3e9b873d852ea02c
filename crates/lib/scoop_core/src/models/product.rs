//! Product catalog models.
//!
//! Field rules are declared with `validator` attributes and checked through
//! [`Validator`](crate::validation::Validator).

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::rules::{ascii, optional_uri, product_id, required_ascii};

/// A catalog product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 3, message = "must be at least 3 characters long"))]
    #[validate(custom(function = "product_id"))]
    pub product_id: String,
    #[validate(length(max = 50, message = "must be at most 50 characters long"))]
    #[validate(custom(function = "required_ascii"))]
    pub name: String,
    #[validate(custom(function = "optional_uri"))]
    pub image_closed_url: String,
    #[validate(custom(function = "optional_uri"))]
    pub image_open_url: String,
    #[validate(length(max = 100, message = "must be at most 100 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub description: String,
    #[validate(length(max = 300, message = "must be at most 300 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub story: String,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    #[validate(length(max = 50, message = "must be at most 50 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub allergy_info: String,
    #[validate(length(max = 25, message = "must be at most 25 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub dietary_certification: String,
}

/// Partial update of a product. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ProductPatch {
    #[validate(length(max = 50, message = "must be at most 50 characters long"))]
    #[validate(custom(function = "required_ascii"))]
    pub name: Option<String>,
    #[validate(url(message = "must be a valid URI"))]
    pub image_closed_url: Option<String>,
    #[validate(url(message = "must be a valid URI"))]
    pub image_open_url: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub description: Option<String>,
    #[validate(length(max = 300, message = "must be at most 300 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub story: Option<String>,
    pub sourcing_values: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    #[validate(length(max = 50, message = "must be at most 50 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub allergy_info: Option<String>,
    #[validate(length(max = 25, message = "must be at most 25 characters long"))]
    #[validate(custom(function = "ascii"))]
    pub dietary_certification: Option<String>,
}

impl ProductPatch {
    /// Apply the patch to `product` in place.
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.image_closed_url {
            product.image_closed_url = v;
        }
        if let Some(v) = self.image_open_url {
            product.image_open_url = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.story {
            product.story = v;
        }
        if let Some(v) = self.sourcing_values {
            product.sourcing_values = Some(v);
        }
        if let Some(v) = self.ingredients {
            product.ingredients = Some(v);
        }
        if let Some(v) = self.allergy_info {
            product.allergy_info = v;
        }
        if let Some(v) = self.dietary_certification {
            product.dietary_certification = v;
        }
    }
}
