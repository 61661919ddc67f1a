use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::ingredient::NewIngredient;
use crate::errors::CatalogError;
use crate::forms::{TEXT_MAX_LEN_VALIDATOR, first_invalid_field, sanitize_inline_text};

/// Result type returned by the ingredient form helpers.
pub type IngredientFormResult<T> = Result<T, IngredientFormError>;

/// Errors that can occur while processing ingredient forms.
#[derive(Debug, Error)]
pub enum IngredientFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A field is empty after sanitization.
    #[error("`{0}` cannot be empty")]
    Empty(&'static str),
}

impl From<IngredientFormError> for CatalogError {
    fn from(value: IngredientFormError) -> Self {
        let field = match value {
            IngredientFormError::Validation(errors) => first_invalid_field(&errors),
            IngredientFormError::Empty(field) => field.to_string(),
        };
        CatalogError::ValueOutOfRange { field }
    }
}

/// Payload for adding an ingredient to the catalog.
#[derive(Debug, Deserialize, Validate)]
pub struct AddIngredientForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub measurement_unit: String,
}

impl AddIngredientForm {
    /// Validates and sanitizes the payload into a domain `NewIngredient`.
    pub fn into_new_ingredient(self) -> IngredientFormResult<NewIngredient> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(IngredientFormError::Empty("name"));
        }

        let measurement_unit = sanitize_inline_text(&self.measurement_unit);
        if measurement_unit.is_empty() {
            return Err(IngredientFormError::Empty("measurement_unit"));
        }

        Ok(NewIngredient::new(name, measurement_unit))
    }
}
