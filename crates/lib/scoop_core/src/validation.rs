//! Input validation rules.
//!
//! Field rules live on the validated types as `validator` attributes. A
//! [`Validator`] is built once at startup and shared read-only with every
//! handler. Each check reports every failing field in one
//! [`CoreError::BadInput`], joined by `"; "`.

use validator::{Validate, ValidationErrors};

use crate::error::{CoreError, CoreResult};
use self::rules::{alphanumeric, printable};
use crate::models::product::{Product, ProductPatch};

/// Signup credentials.
#[derive(Debug, Validate)]
struct Credentials {
    #[validate(length(
        min = 3,
        max = 20,
        message = "must contain 3 to 20 alphanumeric characters"
    ))]
    #[validate(custom(function = "alphanumeric"))]
    username: String,
    #[validate(length(
        min = 8,
        max = 30,
        message = "must contain 8 to 30 printable ascii characters"
    ))]
    #[validate(custom(function = "printable"))]
    password: String,
}

/// Checks credentials and product payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Username: alphanumeric, 3 to 20 chars. Password: printable ASCII, 8 to 30 chars.
    pub fn credentials(&self, username: &str, password: &str) -> CoreResult<()> {
        check(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Rules for a product about to be created.
    pub fn new_product(&self, product: &Product) -> CoreResult<()> {
        check(product)
    }

    /// Rules for a partial update. Absent fields are not checked.
    pub fn product_patch(&self, patch: &ProductPatch) -> CoreResult<()> {
        check(patch)
    }
}

fn check<T: Validate>(value: &T) -> CoreResult<()> {
    value.validate().map_err(|e| CoreError::BadInput(describe(&e)))
}

/// Field name as clients send it.
fn wire_name(field: &str) -> &str {
    match field {
        "product_id" => "productId",
        "image_closed_url" => "image_closed",
        "image_open_url" => "image_open",
        "dietary_certification" => "dietary_certifications",
        other => other,
    }
}

/// One `"<field> <message>"` line per distinct failure, ordered by field.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lines: Vec<String> = Vec::new();
    for (field, field_errors) in fields {
        let field: &str = &field;
        for error in field_errors {
            let message = error.message.as_deref().unwrap_or(&*error.code);
            let line = format!("{} {message}", wire_name(field));
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
    }
    lines.join("; ")
}

/// Custom field rules referenced from `#[validate(custom(..))]`.
pub(crate) mod rules {
    use std::borrow::Cow;

    use validator::ValidationError;

    fn fail(code: &'static str, message: &'static str) -> ValidationError {
        ValidationError::new(code).with_message(Cow::Borrowed(message))
    }

    pub(crate) fn ascii(value: &str) -> Result<(), ValidationError> {
        if value.is_ascii() {
            Ok(())
        } else {
            Err(fail("ascii", "must only contain ascii characters"))
        }
    }

    pub(crate) fn required_ascii(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(fail("required", "is a required field"));
        }
        ascii(value)
    }

    pub(crate) fn product_id(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(fail("required", "is a required field"));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(fail("numeric", "must contain only numeric characters"));
        }
        Ok(())
    }

    pub(crate) fn optional_uri(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() || url::Url::parse(value).is_ok() {
            Ok(())
        } else {
            Err(fail("url", "must be a valid URI"))
        }
    }

    pub(crate) fn alphanumeric(value: &str) -> Result<(), ValidationError> {
        if value.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(())
        } else {
            Err(fail("alphanumeric", "must contain 3 to 20 alphanumeric characters"))
        }
    }

    pub(crate) fn printable(value: &str) -> Result<(), ValidationError> {
        if value.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
            Ok(())
        } else {
            Err(fail("printable", "must contain 8 to 30 printable ascii characters"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator::new()
    }

    fn message(result: CoreResult<()>) -> String {
        match result {
            Err(CoreError::BadInput(msg)) => msg,
            other => panic!("expected BadInput, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_credentials() {
        assert!(validator().credentials("alice", "Secr3tPass").is_ok());
        assert!(validator().credentials("abc", "with space!").is_ok());
    }

    #[test]
    fn rejects_bad_usernames() {
        let v = validator();
        for name in ["ab", "a".repeat(21).as_str(), "alice_b", "ålice", ""] {
            assert!(v.credentials(name, "Secr3tPass").is_err(), "{name}");
        }
    }

    #[test]
    fn rejects_bad_passwords() {
        let v = validator();
        for pw in ["short", "x".repeat(31).as_str(), "tab\tinside", "pässwörd!"] {
            assert!(v.credentials("alice", pw).is_err(), "{pw}");
        }
    }

    #[test]
    fn reports_every_failing_credential() {
        let msg = message(validator().credentials("a", "b"));
        assert!(msg.contains("username"));
        assert!(msg.contains("password"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn product_requires_id_and_name() {
        let msg = message(validator().new_product(&Product::default()));
        assert!(msg.contains("productId is a required field"));
        assert!(msg.contains("name is a required field"));
    }

    #[test]
    fn product_id_must_be_numeric_and_long_enough() {
        let v = validator();
        let mut product = Product {
            product_id: "12".into(),
            name: "Phish Food".into(),
            ..Default::default()
        };
        assert!(message(v.new_product(&product)).contains("at least 3"));
        product.product_id = "abc".into();
        assert!(message(v.new_product(&product)).contains("numeric"));
        product.product_id = "2190".into();
        assert!(v.new_product(&product).is_ok());
    }

    #[test]
    fn product_image_must_be_uri() {
        let product = Product {
            product_id: "2190".into(),
            name: "Phish Food".into(),
            image_open_url: "not a uri".into(),
            ..Default::default()
        };
        assert!(message(validator().new_product(&product)).contains("image_open"));
    }

    #[test]
    fn patch_cannot_blank_the_name() {
        let patch = ProductPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(message(validator().product_patch(&patch)), "name is a required field");
    }

    #[test]
    fn patch_image_must_be_uri() {
        let patch = ProductPatch {
            image_closed_url: Some("not a uri".into()),
            ..Default::default()
        };
        assert!(message(validator().product_patch(&patch)).contains("image_closed"));
    }

    #[test]
    fn messages_use_wire_field_names() {
        let product = Product {
            product_id: "2190".into(),
            name: "Phish Food".into(),
            dietary_certification: "x".repeat(26),
            ..Default::default()
        };
        assert_eq!(
            message(validator().new_product(&product)),
            "dietary_certifications must be at most 25 characters long"
        );
    }

    #[test]
    fn patch_checks_only_present_fields() {
        let v = validator();
        assert!(v.product_patch(&ProductPatch::default()).is_ok());
        let patch = ProductPatch {
            story: Some("s".repeat(301)),
            ..Default::default()
        };
        assert!(message(v.product_patch(&patch)).contains("story"));
    }
}
