use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::composition::{Composition, IngredientAmount};
use crate::domain::recipe::{NewRecipe, UpdateRecipe};
use crate::errors::CatalogError;
use crate::forms::{TEXT_MAX_LEN_VALIDATOR, first_invalid_field, sanitize_inline_text};
use crate::{MAX_VALUE, MIN_VALUE};

/// Result type returned by the recipe form helpers.
pub type RecipeFormResult<T> = Result<T, RecipeFormError>;

#[derive(Debug, Error)]
pub enum RecipeFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("recipe name cannot be empty")]
    EmptyName,
    /// The ingredient amounts or tags do not form a valid composition.
    #[error(transparent)]
    Composition(#[from] CatalogError),
}

impl From<RecipeFormError> for CatalogError {
    fn from(value: RecipeFormError) -> Self {
        match value {
            RecipeFormError::Validation(errors) => CatalogError::ValueOutOfRange {
                field: first_invalid_field(&errors),
            },
            RecipeFormError::EmptyName => CatalogError::ValueOutOfRange {
                field: "name".to_string(),
            },
            RecipeFormError::Composition(err) => err,
        }
    }
}

/// One `(ingredient, amount)` pair as submitted.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct IngredientAmountForm {
    pub id: i32,
    pub amount: i32,
}

/// Full recipe payload used both to create and to replace a recipe.
#[derive(Debug, Deserialize, Validate)]
pub struct RecipeForm {
    #[validate(length(min = 1, max = TEXT_MAX_LEN_VALIDATOR))]
    pub name: String,
    pub text: String,
    /// Reference to an image stored by the caller.
    pub image: String,
    #[validate(range(min = MIN_VALUE, max = MAX_VALUE))]
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmountForm>,
    pub tags: Vec<i32>,
}

impl RecipeForm {
    /// Validates the payload into a new recipe and its initial composition.
    pub fn into_new_recipe(self, author_id: i32) -> RecipeFormResult<(NewRecipe, Composition)> {
        let (name, composition) = self.checked_parts()?;
        let recipe = NewRecipe::new(author_id, name, self.text, self.image, self.cooking_time);
        Ok((recipe, composition))
    }

    /// Validates the payload into a full replacement of an existing recipe.
    pub fn into_update_recipe(self) -> RecipeFormResult<(UpdateRecipe, Composition)> {
        let (name, composition) = self.checked_parts()?;
        let updates = UpdateRecipe::new(name, self.text, self.image, self.cooking_time);
        Ok((updates, composition))
    }

    fn checked_parts(&self) -> RecipeFormResult<(String, Composition)> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(RecipeFormError::EmptyName);
        }

        let amounts = self
            .ingredients
            .iter()
            .map(|item| IngredientAmount::new(item.id, item.amount))
            .collect();
        let composition = Composition::new(amounts, self.tags.clone())?;

        Ok((name, composition))
    }
}
