use std::collections::{HashMap, HashSet};

use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::composition::Composition;
use crate::domain::recipe::RecipeIngredient as DomainRecipeIngredient;
use crate::domain::tag::Tag as DomainTag;
use crate::errors::{CatalogError, CatalogResult};
use crate::models::composition::{NewRecipeIngredient, NewRecipeTag, ResolvedRecipeIngredient};
use crate::models::tag::Tag as DbTag;
use crate::repository::{CompositionWriter, DieselRepository};

impl CompositionWriter for DieselRepository {
    fn set_composition(&self, recipe_id: i32, composition: &Composition) -> CatalogResult<()> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            ensure_recipe(conn, recipe_id)?;
            replace_composition(conn, recipe_id, composition)
        })
    }
}

/// Clear and re-insert every composition row of `recipe_id`.
///
/// Must run inside a transaction. Referenced ingredients and tags are
/// checked before any composition row is touched.
pub(crate) fn replace_composition(
    conn: &mut SqliteConnection,
    recipe_id: i32,
    composition: &Composition,
) -> CatalogResult<()> {
    use crate::schema::{recipe_ingredients, recipe_tags};

    ensure_ingredients(conn, &composition.ingredient_ids())?;
    ensure_tags(conn, composition.tag_ids())?;

    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)?;
    diesel::delete(recipe_tags::table.filter(recipe_tags::recipe_id.eq(recipe_id)))
        .execute(conn)?;

    let ingredient_rows: Vec<NewRecipeIngredient> = composition
        .ingredients()
        .iter()
        .map(|item| NewRecipeIngredient::from_domain(recipe_id, item))
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&ingredient_rows)
        .execute(conn)?;

    let tag_rows: Vec<NewRecipeTag> = composition
        .tag_ids()
        .iter()
        .map(|tag_id| NewRecipeTag {
            recipe_id,
            tag_id: *tag_id,
        })
        .collect();

    diesel::insert_into(recipe_tags::table)
        .values(&tag_rows)
        .execute(conn)?;

    Ok(())
}

pub(crate) fn ensure_recipe(conn: &mut SqliteConnection, recipe_id: i32) -> CatalogResult<()> {
    use crate::schema::recipes;

    let exists = select(exists(recipes::table.filter(recipes::id.eq(recipe_id)))).get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(CatalogError::RecipeNotFound(recipe_id))
    }
}

fn ensure_ingredients(conn: &mut SqliteConnection, ingredient_ids: &[i32]) -> CatalogResult<()> {
    use crate::schema::ingredients;

    let found: HashSet<i32> = ingredients::table
        .filter(ingredients::id.eq_any(ingredient_ids))
        .select(ingredients::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    match ingredient_ids.iter().find(|id| !found.contains(*id)) {
        Some(missing) => Err(CatalogError::IngredientNotFound(*missing)),
        None => Ok(()),
    }
}

fn ensure_tags(conn: &mut SqliteConnection, tag_ids: &[i32]) -> CatalogResult<()> {
    use crate::schema::tags;

    let found: HashSet<i32> = tags::table
        .filter(tags::id.eq_any(tag_ids))
        .select(tags::id)
        .load::<i32>(conn)?
        .into_iter()
        .collect();

    match tag_ids.iter().find(|id| !found.contains(*id)) {
        Some(missing) => Err(CatalogError::TagNotFound(*missing)),
        None => Ok(()),
    }
}

/// Composition entries of `recipe_ids`, keyed by recipe and ordered by
/// ingredient name.
pub(crate) fn load_ingredients_for_recipes(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> CatalogResult<HashMap<i32, Vec<DomainRecipeIngredient>>> {
    use crate::schema::{ingredients, recipe_ingredients};

    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::ingredient_id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
        .load::<ResolvedRecipeIngredient>(conn)?;

    let mut map: HashMap<i32, Vec<DomainRecipeIngredient>> = HashMap::new();
    for row in rows {
        map.entry(row.recipe_id).or_default().push(row.into());
    }

    Ok(map)
}

/// Tags of `recipe_ids`, keyed by recipe and ordered by tag name.
pub(crate) fn load_tags_for_recipes(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> CatalogResult<HashMap<i32, Vec<DomainTag>>> {
    use crate::schema::{recipe_tags, tags};

    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = recipe_tags::table
        .inner_join(tags::table)
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids))
        .select((recipe_tags::recipe_id, DbTag::as_select()))
        .order(tags::name.asc())
        .load::<(i32, DbTag)>(conn)?;

    let mut map: HashMap<i32, Vec<DomainTag>> = HashMap::new();
    for (recipe_id, tag) in rows {
        map.entry(recipe_id).or_default().push(tag.into());
    }

    Ok(map)
}
