use crate::domain::ingredient::{Ingredient, IngredientDeletion, IngredientListQuery};
use crate::errors::CatalogError;
use crate::forms::ingredients::AddIngredientForm;
use crate::repository::{IngredientLifecycle, IngredientReader, IngredientWriter};
use crate::services::{CatalogResult, report};

/// Adds an ingredient to the catalog.
pub fn create_ingredient<R>(repo: &R, form: AddIngredientForm) -> CatalogResult<Ingredient>
where
    R: IngredientWriter + ?Sized,
{
    let new_ingredient = form.into_new_ingredient()?;

    repo.create_ingredient(&new_ingredient).map_err(|err| {
        if let CatalogError::DuplicateIngredient { .. } = &err {
            log::warn!("{err}");
        }
        report(err)
    })
}

/// Active ingredients for catalog browsing, optionally narrowed to names
/// starting with `name_prefix` (case-insensitive).
pub fn list_ingredients<R>(repo: &R, name_prefix: Option<&str>) -> CatalogResult<Vec<Ingredient>>
where
    R: IngredientReader + ?Sized,
{
    let mut query = IngredientListQuery::new();

    if let Some(prefix) = name_prefix.map(str::trim).filter(|prefix| !prefix.is_empty()) {
        query = query.name_prefix(prefix);
    }

    repo.list_ingredients(query).map_err(report)
}

/// Archived ingredients together with their archival timestamp.
pub fn list_archived_ingredients<R>(repo: &R) -> CatalogResult<Vec<Ingredient>>
where
    R: IngredientReader + ?Sized,
{
    repo.list_ingredients(IngredientListQuery::new().archived_only())
        .map_err(report)
}

/// Loads an ingredient in either state.
pub fn get_ingredient<R>(repo: &R, ingredient_id: i32) -> CatalogResult<Ingredient>
where
    R: IngredientReader + ?Sized,
{
    repo.get_ingredient_by_id(ingredient_id)
        .map_err(report)?
        .ok_or(CatalogError::IngredientNotFound(ingredient_id))
}

/// Deletes an unreferenced ingredient or archives a referenced one.
pub fn delete_ingredient<R>(repo: &R, ingredient_id: i32) -> CatalogResult<IngredientDeletion>
where
    R: IngredientLifecycle + ?Sized,
{
    repo.delete_ingredient(ingredient_id).map_err(report)
}

/// Returns an archived ingredient to the catalog.
pub fn unarchive_ingredient<R>(repo: &R, ingredient_id: i32) -> CatalogResult<Ingredient>
where
    R: IngredientLifecycle + ?Sized,
{
    repo.unarchive_ingredient(ingredient_id).map_err(report)
}

/// Hard-deletes an ingredient no recipe references.
pub fn purge_ingredient<R>(repo: &R, ingredient_id: i32) -> CatalogResult<()>
where
    R: IngredientLifecycle + ?Sized,
{
    repo.purge_ingredient(ingredient_id).map_err(report)
}

/// Drops the archive record of an archived ingredient. The ingredient is
/// purged along with it, so the call fails with `IngredientInUse` while
/// recipes still reference it.
pub fn discard_archive_record<R>(repo: &R, ingredient_id: i32) -> CatalogResult<()>
where
    R: IngredientLifecycle + ?Sized,
{
    repo.discard_archive_record(ingredient_id).map_err(report)
}
