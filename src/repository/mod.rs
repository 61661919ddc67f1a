use diesel::connection::SimpleConnection;
use pushkind_common::db::{DbConnection, DbPool};

use crate::domain::{
    composition::Composition,
    ingredient::{Ingredient, IngredientDeletion, IngredientListQuery, NewIngredient},
    membership::{MembershipEntry, Relation},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    shopping_list::CartIngredientLine,
    tag::{NewTag, Tag},
    user::{NewUser, User},
};
use crate::errors::CatalogResult;

pub mod composition;
pub mod ingredient;
pub mod membership;
pub mod recipe;
pub mod shopping_list;
pub mod tag;
pub mod user;

#[cfg(test)]
pub mod mock;

/// Applied to every connection handed out by the repository.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> CatalogResult<DbConnection> {
        let mut conn = self.pool.get()?;
        conn.batch_execute(CONNECTION_PRAGMAS)?;
        Ok(conn)
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> CatalogResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> CatalogResult<User>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn get_tag_by_id(&self, id: i32) -> CatalogResult<Option<Tag>>;
    fn list_tags(&self) -> CatalogResult<Vec<Tag>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> CatalogResult<Tag>;
}

/// Read-only operations over ingredients in either lifecycle state.
pub trait IngredientReader {
    fn get_ingredient_by_id(&self, id: i32) -> CatalogResult<Option<Ingredient>>;
    fn list_ingredients(&self, query: IngredientListQuery) -> CatalogResult<Vec<Ingredient>>;
}

pub trait IngredientWriter {
    fn create_ingredient(&self, new_ingredient: &NewIngredient) -> CatalogResult<Ingredient>;
}

/// Lifecycle transitions of an ingredient. Each call runs in its own
/// write-locked transaction.
pub trait IngredientLifecycle {
    /// Purge when unreferenced, archive otherwise.
    fn delete_ingredient(&self, id: i32) -> CatalogResult<IngredientDeletion>;
    fn unarchive_ingredient(&self, id: i32) -> CatalogResult<Ingredient>;
    /// Hard delete; fails while composition entries reference the ingredient.
    fn purge_ingredient(&self, id: i32) -> CatalogResult<()>;
    /// Remove the archive record, purging the still archived ingredient with it.
    fn discard_archive_record(&self, ingredient_id: i32) -> CatalogResult<()>;
}

/// Read-only operations over recipes and their composition.
pub trait RecipeReader {
    fn get_recipe_by_id(&self, id: i32) -> CatalogResult<Option<Recipe>>;
    fn list_recipes(&self, query: RecipeListQuery) -> CatalogResult<(usize, Vec<Recipe>)>;
}

/// Recipe writes. Create and update store the scalar fields and the
/// composition in one transaction.
pub trait RecipeWriter {
    fn create_recipe(&self, new_recipe: &NewRecipe, composition: &Composition) -> CatalogResult<Recipe>;
    fn update_recipe(
        &self,
        recipe_id: i32,
        updates: &UpdateRecipe,
        composition: &Composition,
    ) -> CatalogResult<Recipe>;
    fn delete_recipe(&self, recipe_id: i32) -> CatalogResult<()>;
}

/// Wholesale replacement of a recipe's ingredient amounts and tags.
pub trait CompositionWriter {
    fn set_composition(&self, recipe_id: i32, composition: &Composition) -> CatalogResult<()>;
}

/// Unique-membership set for one [`Relation`].
pub trait MembershipStore<R: Relation> {
    fn add_member(&self, key: R::Key) -> CatalogResult<MembershipEntry<R::Key>>;
    fn remove_member(&self, key: R::Key) -> CatalogResult<()>;
    fn has_member(&self, key: R::Key) -> CatalogResult<bool>;
    fn list_members(&self, owner_id: i32) -> CatalogResult<Vec<MembershipEntry<R::Key>>>;
}

/// Source rows for the shopping list.
pub trait ShoppingListReader {
    /// Every composition entry of every recipe in the user's cart.
    fn list_cart_ingredient_lines(&self, user_id: i32) -> CatalogResult<Vec<CartIngredientLine>>;
}
