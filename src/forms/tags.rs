use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::tag::NewTag;
use crate::errors::CatalogError;
use crate::forms::{TEXT_MAX_LEN_VALIDATOR, first_invalid_field, sanitize_inline_text};

/// Result type returned by the tag form helpers.
pub type TagFormResult<T> = Result<T, TagFormError>;

/// Errors that can occur while processing tag forms.
#[derive(Debug, Error)]
pub enum TagFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("tag name cannot be empty")]
    EmptyName,
}

impl From<TagFormError> for CatalogError {
    fn from(value: TagFormError) -> Self {
        let field = match value {
            TagFormError::Validation(errors) => first_invalid_field(&errors),
            TagFormError::EmptyName => "name".to_string(),
        };
        CatalogError::ValueOutOfRange { field }
    }
}

/// Form payload emitted when submitting the "Add tag" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddTagForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Hex color, `#RRGGBB`.
    #[validate(custom(function = "validate_hex_color"))]
    pub color: String,
    #[validate(
        length(min = 1, max = TEXT_MAX_LEN_VALIDATOR),
        custom(function = "validate_slug")
    )]
    pub slug: String,
}

impl AddTagForm {
    /// Validates and sanitizes the payload into a domain `NewTag`. The color
    /// is stored upper-case.
    pub fn into_new_tag(self) -> TagFormResult<NewTag> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(TagFormError::EmptyName);
        }

        Ok(NewTag::new(
            sanitized_name,
            self.color.trim().to_ascii_uppercase(),
            self.slug.trim(),
        ))
    }
}

fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|ch| ch.is_ascii_hexdigit());

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}
