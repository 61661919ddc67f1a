use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::membership::{
    Favorites, MembershipEntry, Relation, ShoppingCart, SubscriberAuthor, Subscriptions,
    UserRecipe,
};
use crate::errors::{CatalogError, CatalogResult, on_unique_violation};
use crate::models::membership::MembershipRow;
use crate::repository::composition::ensure_recipe;
use crate::repository::{DieselRepository, MembershipStore};

/// Storage binding of a [`Relation`]: which table holds its pairs and which
/// rows both ends must point at.
pub trait MembershipTable: Relation {
    /// Check that both ends of the pair exist.
    fn ensure_targets(conn: &mut SqliteConnection, key: &Self::Key) -> CatalogResult<()>;
    fn insert(conn: &mut SqliteConnection, key: &Self::Key) -> QueryResult<MembershipRow>;
    fn delete(conn: &mut SqliteConnection, key: &Self::Key) -> QueryResult<usize>;
    fn contains(conn: &mut SqliteConnection, key: &Self::Key) -> QueryResult<bool>;
    fn list_for_owner(conn: &mut SqliteConnection, owner_id: i32) -> QueryResult<Vec<MembershipRow>>;
}

impl<R> MembershipStore<R> for DieselRepository
where
    R: MembershipTable,
{
    fn add_member(&self, key: R::Key) -> CatalogResult<MembershipEntry<R::Key>> {
        R::validate(&key)?;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, CatalogError, _>(|conn| {
            R::ensure_targets(conn, &key)?;

            let row = R::insert(conn, &key).map_err(|err| {
                on_unique_violation(err, || CatalogError::AlreadyExists { relation: R::NAME })
            })?;

            Ok(row.into_entry::<R>())
        })
    }

    fn remove_member(&self, key: R::Key) -> CatalogResult<()> {
        let mut conn = self.conn()?;

        let deleted = R::delete(&mut conn, &key)?;
        if deleted == 0 {
            return Err(CatalogError::NotFound { relation: R::NAME });
        }

        Ok(())
    }

    fn has_member(&self, key: R::Key) -> CatalogResult<bool> {
        let mut conn = self.conn()?;
        Ok(R::contains(&mut conn, &key)?)
    }

    fn list_members(&self, owner_id: i32) -> CatalogResult<Vec<MembershipEntry<R::Key>>> {
        let mut conn = self.conn()?;

        let rows = R::list_for_owner(&mut conn, owner_id)?;
        Ok(rows.into_iter().map(MembershipRow::into_entry::<R>).collect())
    }
}

impl MembershipTable for Favorites {
    fn ensure_targets(conn: &mut SqliteConnection, key: &UserRecipe) -> CatalogResult<()> {
        ensure_user(conn, key.user_id)?;
        ensure_recipe(conn, key.recipe_id)
    }

    fn insert(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<MembershipRow> {
        use crate::schema::favorites;

        diesel::insert_into(favorites::table)
            .values((
                favorites::user_id.eq(key.user_id),
                favorites::recipe_id.eq(key.recipe_id),
            ))
            .returning((
                favorites::id,
                favorites::user_id,
                favorites::recipe_id,
                favorites::created_at,
            ))
            .get_result(conn)
    }

    fn delete(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<usize> {
        use crate::schema::favorites;

        diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(key.user_id))
                .filter(favorites::recipe_id.eq(key.recipe_id)),
        )
        .execute(conn)
    }

    fn contains(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<bool> {
        use crate::schema::favorites;

        select(exists(
            favorites::table
                .filter(favorites::user_id.eq(key.user_id))
                .filter(favorites::recipe_id.eq(key.recipe_id)),
        ))
        .get_result(conn)
    }

    fn list_for_owner(conn: &mut SqliteConnection, owner_id: i32) -> QueryResult<Vec<MembershipRow>> {
        use crate::schema::favorites;

        favorites::table
            .filter(favorites::user_id.eq(owner_id))
            .select((
                favorites::id,
                favorites::user_id,
                favorites::recipe_id,
                favorites::created_at,
            ))
            .order(favorites::id.asc())
            .load(conn)
    }
}

impl MembershipTable for ShoppingCart {
    fn ensure_targets(conn: &mut SqliteConnection, key: &UserRecipe) -> CatalogResult<()> {
        ensure_user(conn, key.user_id)?;
        ensure_recipe(conn, key.recipe_id)
    }

    fn insert(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<MembershipRow> {
        use crate::schema::shopping_cart_entries as cart;

        diesel::insert_into(cart::table)
            .values((cart::user_id.eq(key.user_id), cart::recipe_id.eq(key.recipe_id)))
            .returning((cart::id, cart::user_id, cart::recipe_id, cart::created_at))
            .get_result(conn)
    }

    fn delete(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<usize> {
        use crate::schema::shopping_cart_entries as cart;

        diesel::delete(
            cart::table
                .filter(cart::user_id.eq(key.user_id))
                .filter(cart::recipe_id.eq(key.recipe_id)),
        )
        .execute(conn)
    }

    fn contains(conn: &mut SqliteConnection, key: &UserRecipe) -> QueryResult<bool> {
        use crate::schema::shopping_cart_entries as cart;

        select(exists(
            cart::table
                .filter(cart::user_id.eq(key.user_id))
                .filter(cart::recipe_id.eq(key.recipe_id)),
        ))
        .get_result(conn)
    }

    fn list_for_owner(conn: &mut SqliteConnection, owner_id: i32) -> QueryResult<Vec<MembershipRow>> {
        use crate::schema::shopping_cart_entries as cart;

        cart::table
            .filter(cart::user_id.eq(owner_id))
            .select((cart::id, cart::user_id, cart::recipe_id, cart::created_at))
            .order(cart::id.asc())
            .load(conn)
    }
}

impl MembershipTable for Subscriptions {
    fn ensure_targets(conn: &mut SqliteConnection, key: &SubscriberAuthor) -> CatalogResult<()> {
        ensure_user(conn, key.subscriber_id)?;
        ensure_user(conn, key.author_id)
    }

    fn insert(conn: &mut SqliteConnection, key: &SubscriberAuthor) -> QueryResult<MembershipRow> {
        use crate::schema::subscriptions;

        diesel::insert_into(subscriptions::table)
            .values((
                subscriptions::subscriber_id.eq(key.subscriber_id),
                subscriptions::author_id.eq(key.author_id),
            ))
            .returning((
                subscriptions::id,
                subscriptions::subscriber_id,
                subscriptions::author_id,
                subscriptions::created_at,
            ))
            .get_result(conn)
    }

    fn delete(conn: &mut SqliteConnection, key: &SubscriberAuthor) -> QueryResult<usize> {
        use crate::schema::subscriptions;

        diesel::delete(
            subscriptions::table
                .filter(subscriptions::subscriber_id.eq(key.subscriber_id))
                .filter(subscriptions::author_id.eq(key.author_id)),
        )
        .execute(conn)
    }

    fn contains(conn: &mut SqliteConnection, key: &SubscriberAuthor) -> QueryResult<bool> {
        use crate::schema::subscriptions;

        select(exists(
            subscriptions::table
                .filter(subscriptions::subscriber_id.eq(key.subscriber_id))
                .filter(subscriptions::author_id.eq(key.author_id)),
        ))
        .get_result(conn)
    }

    fn list_for_owner(conn: &mut SqliteConnection, owner_id: i32) -> QueryResult<Vec<MembershipRow>> {
        use crate::schema::subscriptions;

        subscriptions::table
            .filter(subscriptions::subscriber_id.eq(owner_id))
            .select((
                subscriptions::id,
                subscriptions::subscriber_id,
                subscriptions::author_id,
                subscriptions::created_at,
            ))
            .order(subscriptions::author_id.asc())
            .load(conn)
    }
}

fn ensure_user(conn: &mut SqliteConnection, user_id: i32) -> CatalogResult<()> {
    use crate::schema::users;

    let exists = select(exists(users::table.filter(users::id.eq(user_id)))).get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(CatalogError::UserNotFound(user_id))
    }
}
