use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::composition::Composition;
use crate::domain::recipe::{
    NewRecipe as DomainNewRecipe, Recipe as DomainRecipe, RecipeListQuery,
    UpdateRecipe as DomainUpdateRecipe,
};
use crate::errors::{CatalogError, CatalogResult};
use crate::models::recipe::{
    NewRecipe as DbNewRecipe, Recipe as DbRecipe, UpdateRecipe as DbUpdateRecipe,
};
use crate::repository::composition::{
    ensure_recipe, load_ingredients_for_recipes, load_tags_for_recipes, replace_composition,
};
use crate::repository::{DieselRepository, RecipeReader, RecipeWriter};

impl RecipeReader for DieselRepository {
    fn get_recipe_by_id(&self, id: i32) -> CatalogResult<Option<DomainRecipe>> {
        let mut conn = self.conn()?;
        find_recipe(&mut conn, id)
    }

    fn list_recipes(&self, query: RecipeListQuery) -> CatalogResult<(usize, Vec<DomainRecipe>)> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let total = filtered_recipes(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_recipes(&query)
            .order((recipes::pub_date.desc(), recipes::id.desc()));

        if let Some(limit) = query.limit {
            items = items.limit(limit);
        }

        let db_recipes = items.load::<DbRecipe>(&mut conn)?;

        if db_recipes.is_empty() {
            return Ok((total, Vec::new()));
        }

        let recipe_ids: Vec<i32> = db_recipes.iter().map(|recipe| recipe.id).collect();
        let recipes = assemble_recipes(&mut conn, db_recipes, &recipe_ids)?;

        Ok((total, recipes))
    }
}

impl RecipeWriter for DieselRepository {
    fn create_recipe(
        &self,
        new_recipe: &DomainNewRecipe,
        composition: &Composition,
    ) -> CatalogResult<DomainRecipe> {
        use crate::schema::{recipes, users};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let author_exists = select(exists(
                users::table.filter(users::id.eq(new_recipe.author_id)),
            ))
            .get_result::<bool>(conn)?;

            if !author_exists {
                return Err(CatalogError::UserNotFound(new_recipe.author_id));
            }

            let created = diesel::insert_into(recipes::table)
                .values(&DbNewRecipe::from(new_recipe))
                .get_result::<DbRecipe>(conn)?;

            replace_composition(conn, created.id, composition)?;

            find_recipe(conn, created.id)?.ok_or(CatalogError::RecipeNotFound(created.id))
        })
    }

    fn update_recipe(
        &self,
        recipe_id: i32,
        updates: &DomainUpdateRecipe,
        composition: &Composition,
    ) -> CatalogResult<DomainRecipe> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            ensure_recipe(conn, recipe_id)?;
            replace_composition(conn, recipe_id, composition)?;

            diesel::update(recipes::table.filter(recipes::id.eq(recipe_id)))
                .set(&DbUpdateRecipe::from(updates))
                .execute(conn)?;

            find_recipe(conn, recipe_id)?.ok_or(CatalogError::RecipeNotFound(recipe_id))
        })
    }

    fn delete_recipe(&self, recipe_id: i32) -> CatalogResult<()> {
        use crate::schema::recipes;

        let mut conn = self.conn()?;

        let deleted =
            diesel::delete(recipes::table.filter(recipes::id.eq(recipe_id))).execute(&mut conn)?;
        if deleted == 0 {
            return Err(CatalogError::RecipeNotFound(recipe_id));
        }

        Ok(())
    }
}

fn filtered_recipes(
    query: &RecipeListQuery,
) -> crate::schema::recipes::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    use crate::schema::{favorites, recipe_tags, recipes, shopping_cart_entries, tags};

    let mut items = recipes::table.into_boxed::<diesel::sqlite::Sqlite>();

    if let Some(author_id) = query.author_id {
        items = items.filter(recipes::author_id.eq(author_id));
    }

    if !query.tag_slugs.is_empty() {
        let tagged = recipe_tags::table
            .inner_join(tags::table)
            .filter(tags::slug.eq_any(query.tag_slugs.clone()))
            .select(recipe_tags::recipe_id);
        items = items.filter(recipes::id.eq_any(tagged));
    }

    if let Some(user_id) = query.favorited_by {
        let favorite_ids = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .select(favorites::recipe_id);
        items = items.filter(recipes::id.eq_any(favorite_ids));
    }

    if let Some(user_id) = query.in_cart_of {
        let cart_ids = shopping_cart_entries::table
            .filter(shopping_cart_entries::user_id.eq(user_id))
            .select(shopping_cart_entries::recipe_id);
        items = items.filter(recipes::id.eq_any(cart_ids));
    }

    items
}

fn find_recipe(conn: &mut SqliteConnection, id: i32) -> CatalogResult<Option<DomainRecipe>> {
    use crate::schema::recipes;

    let recipe = recipes::table
        .filter(recipes::id.eq(id))
        .first::<DbRecipe>(conn)
        .optional()?;

    let Some(recipe) = recipe else {
        return Ok(None);
    };

    let mut recipes = assemble_recipes(conn, vec![recipe], &[id])?;
    Ok(recipes.pop())
}

fn assemble_recipes(
    conn: &mut SqliteConnection,
    db_recipes: Vec<DbRecipe>,
    recipe_ids: &[i32],
) -> CatalogResult<Vec<DomainRecipe>> {
    let mut ingredient_map = load_ingredients_for_recipes(conn, recipe_ids)?;
    let mut tag_map = load_tags_for_recipes(conn, recipe_ids)?;

    let recipes = db_recipes
        .into_iter()
        .map(|recipe| {
            let ingredients = ingredient_map.remove(&recipe.id).unwrap_or_default();
            let tags = tag_map.remove(&recipe.id).unwrap_or_default();
            recipe.into_domain(ingredients, tags)
        })
        .collect();

    Ok(recipes)
}
