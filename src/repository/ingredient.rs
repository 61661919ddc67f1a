use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::ingredient::{
    DeleteStep, Ingredient as DomainIngredient, IngredientDeletion, IngredientListQuery,
    IngredientState, NewIngredient as DomainNewIngredient,
};
use crate::errors::{CatalogError, CatalogResult, on_unique_violation};
use crate::models::ingredient::{
    ArchivedIngredient as DbArchivedIngredient, Ingredient as DbIngredient,
    NewArchivedIngredient as DbNewArchivedIngredient, NewIngredient as DbNewIngredient,
};
use crate::repository::{DieselRepository, IngredientLifecycle, IngredientReader, IngredientWriter};

impl IngredientReader for DieselRepository {
    fn get_ingredient_by_id(&self, id: i32) -> CatalogResult<Option<DomainIngredient>> {
        let mut conn = self.conn()?;
        find_ingredient(&mut conn, id)
    }

    fn list_ingredients(&self, query: IngredientListQuery) -> CatalogResult<Vec<DomainIngredient>> {
        use crate::schema::{archived_ingredients, ingredients};

        let mut conn = self.conn()?;

        let mut items = ingredients::table
            .left_join(archived_ingredients::table)
            .select((
                DbIngredient::as_select(),
                Option::<DbArchivedIngredient>::as_select(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(state) = query.state {
            items = items.filter(ingredients::state.eq(state.as_str()));
        }

        if let Some(prefix) = query.name_prefix.as_ref() {
            // SQLite LIKE is case-insensitive for ASCII.
            let pattern = format!("{}%", escape_like(prefix));
            items = items.filter(ingredients::name.like(pattern).escape('\\'));
        }

        let rows = items
            .order((ingredients::name.asc(), ingredients::measurement_unit.asc()))
            .load::<(DbIngredient, Option<DbArchivedIngredient>)>(&mut conn)?;

        rows.into_iter()
            .map(|(ingredient, archive)| ingredient.into_domain(archive))
            .collect()
    }
}

impl IngredientWriter for DieselRepository {
    fn create_ingredient(&self, new_ingredient: &DomainNewIngredient) -> CatalogResult<DomainIngredient> {
        use crate::schema::ingredients;

        let mut conn = self.conn()?;
        let insertable = DbNewIngredient::from(new_ingredient);

        let created = diesel::insert_into(ingredients::table)
            .values(&insertable)
            .get_result::<DbIngredient>(&mut conn)
            .map_err(|err| {
                on_unique_violation(err, || CatalogError::DuplicateIngredient {
                    name: new_ingredient.name.clone(),
                    measurement_unit: new_ingredient.measurement_unit.clone(),
                })
            })?;

        created.into_domain(None)
    }
}

impl IngredientLifecycle for DieselRepository {
    fn delete_ingredient(&self, id: i32) -> CatalogResult<IngredientDeletion> {
        use crate::schema::{archived_ingredients, ingredients};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let ingredient =
                find_ingredient(conn, id)?.ok_or(CatalogError::IngredientNotFound(id))?;
            let references = count_references(conn, id)?;

            match ingredient.state.delete_step(references) {
                DeleteStep::Purge => {
                    remove_ingredient(conn, id)?;
                    log::info!("Ingredient {id} purged");
                    Ok(IngredientDeletion::Purged)
                }
                DeleteStep::Archive => {
                    diesel::update(ingredients::table.filter(ingredients::id.eq(id)))
                        .set(ingredients::state.eq(IngredientState::Archived.as_str()))
                        .execute(conn)?;

                    diesel::insert_into(archived_ingredients::table)
                        .values(&DbNewArchivedIngredient {
                            ingredient_id: id,
                            archived_at: Local::now().naive_utc(),
                        })
                        .execute(conn)?;

                    log::info!("Ingredient {id} archived, still used by {references} recipe(s)");
                    let archived =
                        find_ingredient(conn, id)?.ok_or(CatalogError::IngredientNotFound(id))?;
                    Ok(IngredientDeletion::Archived(archived))
                }
                DeleteStep::Keep => Ok(IngredientDeletion::Archived(ingredient)),
            }
        })
    }

    fn unarchive_ingredient(&self, id: i32) -> CatalogResult<DomainIngredient> {
        use crate::schema::{archived_ingredients, ingredients};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let ingredient =
                find_ingredient(conn, id)?.ok_or(CatalogError::IngredientNotFound(id))?;

            if !ingredient.state.can_unarchive() {
                return Err(CatalogError::NotArchived(id));
            }

            diesel::delete(
                archived_ingredients::table.filter(archived_ingredients::ingredient_id.eq(id)),
            )
            .execute(conn)?;

            diesel::update(ingredients::table.filter(ingredients::id.eq(id)))
                .set(ingredients::state.eq(IngredientState::Active.as_str()))
                .execute(conn)?;

            log::info!("Ingredient {id} restored from archive");
            find_ingredient(conn, id)?.ok_or(CatalogError::IngredientNotFound(id))
        })
    }

    fn purge_ingredient(&self, id: i32) -> CatalogResult<()> {
        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            find_ingredient(conn, id)?.ok_or(CatalogError::IngredientNotFound(id))?;
            purge_unreferenced(conn, id)
        })
    }

    fn discard_archive_record(&self, ingredient_id: i32) -> CatalogResult<()> {
        use crate::schema::archived_ingredients;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            let ingredient = find_ingredient(conn, ingredient_id)?
                .ok_or(CatalogError::IngredientNotFound(ingredient_id))?;

            let record = archived_ingredients::table
                .filter(archived_ingredients::ingredient_id.eq(ingredient_id))
                .first::<DbArchivedIngredient>(conn)
                .optional()?;

            if record.is_none() || !ingredient.is_archived() {
                return Err(CatalogError::NotArchived(ingredient_id));
            }

            // The record only exists while the ingredient is archived, so
            // dropping it takes the ingredient with it.
            purge_unreferenced(conn, ingredient_id)
        })
    }
}

fn find_ingredient(conn: &mut SqliteConnection, id: i32) -> CatalogResult<Option<DomainIngredient>> {
    use crate::schema::{archived_ingredients, ingredients};

    let row = ingredients::table
        .left_join(archived_ingredients::table)
        .filter(ingredients::id.eq(id))
        .select((
            DbIngredient::as_select(),
            Option::<DbArchivedIngredient>::as_select(),
        ))
        .first::<(DbIngredient, Option<DbArchivedIngredient>)>(conn)
        .optional()?;

    row.map(|(ingredient, archive)| ingredient.into_domain(archive))
        .transpose()
}

fn count_references(conn: &mut SqliteConnection, ingredient_id: i32) -> CatalogResult<i64> {
    use crate::schema::recipe_ingredients;

    let references = recipe_ingredients::table
        .filter(recipe_ingredients::ingredient_id.eq(ingredient_id))
        .count()
        .get_result::<i64>(conn)?;

    Ok(references)
}

fn purge_unreferenced(conn: &mut SqliteConnection, ingredient_id: i32) -> CatalogResult<()> {
    let references = count_references(conn, ingredient_id)?;
    if references > 0 {
        return Err(CatalogError::IngredientInUse(ingredient_id));
    }

    remove_ingredient(conn, ingredient_id)?;
    log::info!("Ingredient {ingredient_id} purged");
    Ok(())
}

fn remove_ingredient(conn: &mut SqliteConnection, ingredient_id: i32) -> CatalogResult<()> {
    use crate::schema::{archived_ingredients, ingredients};

    diesel::delete(
        archived_ingredients::table.filter(archived_ingredients::ingredient_id.eq(ingredient_id)),
    )
    .execute(conn)?;

    let deleted = diesel::delete(ingredients::table.filter(ingredients::id.eq(ingredient_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(CatalogError::IngredientNotFound(ingredient_id));
    }

    Ok(())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
