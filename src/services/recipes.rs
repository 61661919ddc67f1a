use std::collections::HashSet;

use serde::Serialize;

use crate::domain::composition::{Composition, IngredientAmount};
use crate::domain::membership::{Favorites, ShoppingCart, UserRecipe};
use crate::domain::recipe::{Recipe, RecipeListQuery};
use crate::errors::CatalogError;
use crate::forms::recipes::RecipeForm;
use crate::repository::{CompositionWriter, MembershipStore, RecipeReader, RecipeWriter};
use crate::services::{CatalogResult, report};

/// Recipe as seen by one viewer.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecipeView {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeView {
    /// View for an anonymous caller: both flags are false.
    pub fn anonymous(recipe: Recipe) -> Self {
        Self {
            recipe,
            is_favorited: false,
            is_in_shopping_cart: false,
        }
    }
}

/// Creates a recipe together with its initial composition.
pub fn create_recipe<R>(repo: &R, author_id: i32, form: RecipeForm) -> CatalogResult<Recipe>
where
    R: RecipeWriter + ?Sized,
{
    let (new_recipe, composition) = form.into_new_recipe(author_id)?;

    let recipe = repo
        .create_recipe(&new_recipe, &composition)
        .map_err(report)?;
    log::info!("Recipe {} created by user {author_id}", recipe.id);
    Ok(recipe)
}

/// Replaces the fields and the whole composition of a recipe.
pub fn update_recipe<R>(repo: &R, recipe_id: i32, form: RecipeForm) -> CatalogResult<Recipe>
where
    R: RecipeWriter + ?Sized,
{
    let (updates, composition) = form.into_update_recipe()?;

    let recipe = repo
        .update_recipe(recipe_id, &updates, &composition)
        .map_err(report)?;
    log::info!("Recipe {recipe_id} updated");
    Ok(recipe)
}

/// Deletes a recipe with its composition, favorites and cart entries.
pub fn delete_recipe<R>(repo: &R, recipe_id: i32) -> CatalogResult<()>
where
    R: RecipeWriter + ?Sized,
{
    repo.delete_recipe(recipe_id).map_err(report)?;
    log::info!("Recipe {recipe_id} deleted");
    Ok(())
}

/// Replaces the ingredient amounts and tags of a recipe in one step.
pub fn set_composition<R>(
    repo: &R,
    recipe_id: i32,
    ingredients: Vec<IngredientAmount>,
    tag_ids: Vec<i32>,
) -> CatalogResult<()>
where
    R: CompositionWriter + ?Sized,
{
    let composition = Composition::new(ingredients, tag_ids)?;
    repo.set_composition(recipe_id, &composition).map_err(report)
}

/// Loads a recipe with the viewer's favorite and cart flags.
pub fn get_recipe<R>(repo: &R, recipe_id: i32, viewer: Option<i32>) -> CatalogResult<RecipeView>
where
    R: RecipeReader + MembershipStore<Favorites> + MembershipStore<ShoppingCart> + ?Sized,
{
    let recipe = repo
        .get_recipe_by_id(recipe_id)
        .map_err(report)?
        .ok_or(CatalogError::RecipeNotFound(recipe_id))?;

    let Some(user_id) = viewer else {
        return Ok(RecipeView::anonymous(recipe));
    };

    let key = UserRecipe::new(user_id, recipe_id);
    let is_favorited = MembershipStore::<Favorites>::has_member(repo, key).map_err(report)?;
    let is_in_shopping_cart =
        MembershipStore::<ShoppingCart>::has_member(repo, key).map_err(report)?;

    Ok(RecipeView {
        recipe,
        is_favorited,
        is_in_shopping_cart,
    })
}

/// Lists recipes newest first, returning the total number of matches
/// alongside the (possibly limited) items.
pub fn list_recipes<R>(
    repo: &R,
    query: RecipeListQuery,
    viewer: Option<i32>,
) -> CatalogResult<(usize, Vec<RecipeView>)>
where
    R: RecipeReader + MembershipStore<Favorites> + MembershipStore<ShoppingCart> + ?Sized,
{
    let (total, recipes) = repo.list_recipes(query).map_err(report)?;

    let Some(user_id) = viewer else {
        return Ok((total, recipes.into_iter().map(RecipeView::anonymous).collect()));
    };

    let favorites: HashSet<i32> = MembershipStore::<Favorites>::list_members(repo, user_id)
        .map_err(report)?
        .into_iter()
        .map(|entry| entry.key.recipe_id)
        .collect();
    let cart: HashSet<i32> = MembershipStore::<ShoppingCart>::list_members(repo, user_id)
        .map_err(report)?
        .into_iter()
        .map(|entry| entry.key.recipe_id)
        .collect();

    let views = recipes
        .into_iter()
        .map(|recipe| RecipeView {
            is_favorited: favorites.contains(&recipe.id),
            is_in_shopping_cart: cart.contains(&recipe.id),
            recipe,
        })
        .collect();

    Ok((total, views))
}
