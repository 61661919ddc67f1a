use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tag::Tag;

/// Domain representation of a recipe together with its composition.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Unique identifier of the recipe.
    pub id: i32,
    /// Identifier of the user who authored the recipe.
    pub author_id: i32,
    /// Human-readable name of the recipe.
    pub name: String,
    /// Preparation instructions.
    pub text: String,
    /// Reference to the stored image.
    pub image: String,
    /// Cooking time in minutes.
    pub cooking_time: i32,
    /// Ingredient amounts ordered by ingredient name.
    pub ingredients: Vec<RecipeIngredient>,
    /// Tags ordered by name.
    pub tags: Vec<Tag>,
    /// Timestamp for when the recipe was published.
    pub pub_date: NaiveDateTime,
    /// Timestamp for the last update to the recipe record.
    pub updated_at: NaiveDateTime,
}

/// One composition entry resolved against its ingredient.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Payload required to insert a new recipe.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Identifier of the authoring user.
    pub author_id: i32,
    /// Human-readable name of the recipe.
    pub name: String,
    /// Preparation instructions.
    pub text: String,
    /// Reference to the stored image.
    pub image: String,
    /// Cooking time in minutes.
    pub cooking_time: i32,
    /// Timestamp captured when the recipe payload was created.
    pub pub_date: NaiveDateTime,
}

impl NewRecipe {
    /// Build a new recipe payload stamped with the current time.
    pub fn new(
        author_id: i32,
        name: impl Into<String>,
        text: impl Into<String>,
        image: impl Into<String>,
        cooking_time: i32,
    ) -> Self {
        Self {
            author_id,
            name: name.into(),
            text: text.into(),
            image: image.into(),
            cooking_time,
            pub_date: chrono::Local::now().naive_utc(),
        }
    }
}

/// Full replacement of a recipe's scalar fields.
#[derive(Debug, Clone)]
pub struct UpdateRecipe {
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateRecipe {
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        image: impl Into<String>,
        cooking_time: i32,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            image: image.into(),
            cooking_time,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list recipes, newest first.
#[derive(Debug, Clone, Default)]
pub struct RecipeListQuery {
    /// Only recipes written by this user.
    pub author_id: Option<i32>,
    /// Only recipes carrying at least one of these tag slugs.
    pub tag_slugs: Vec<String>,
    /// Only recipes this user marked as favorite.
    pub favorited_by: Option<i32>,
    /// Only recipes in this user's shopping cart.
    pub in_cart_of: Option<i32>,
    /// Maximum number of recipes returned.
    pub limit: Option<i64>,
}

impl RecipeListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by author.
    pub fn author_id(mut self, author_id: i32) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Filter the results to recipes tagged with any of `slugs`.
    pub fn tag_slugs<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_slugs = slugs.into_iter().map(Into::into).collect();
        self
    }

    /// Filter the results to the favorites of `user_id`.
    pub fn favorited_by(mut self, user_id: i32) -> Self {
        self.favorited_by = Some(user_id);
        self
    }

    /// Filter the results to the shopping cart of `user_id`.
    pub fn in_cart_of(mut self, user_id: i32) -> Self {
        self.in_cart_of = Some(user_id);
        self
    }

    /// Cap the number of returned recipes.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
