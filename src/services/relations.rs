use serde::Serialize;

use crate::domain::membership::{Favorites, Relation, ShoppingCart, Subscriptions};
use crate::domain::recipe::{Recipe, RecipeListQuery};
use crate::domain::user::User;
use crate::errors::CatalogError;
use crate::repository::{MembershipStore, RecipeReader, UserReader};
use crate::services::{CatalogResult, report};

/// Adds or removes the `(owner_id, target_id)` pair of relation `R`.
///
/// Adding a present pair fails with `AlreadyExists`, removing an absent one
/// with `NotFound`.
pub fn toggle_membership<R, S>(repo: &S, owner_id: i32, target_id: i32, add: bool) -> CatalogResult<()>
where
    R: Relation,
    S: MembershipStore<R> + ?Sized,
{
    let key = R::key(owner_id, target_id);

    let result = if add {
        repo.add_member(key).map(|_| ())
    } else {
        repo.remove_member(key)
    };

    match result {
        Ok(()) => {
            log::debug!(
                "{} {owner_id} -> {target_id} {}",
                R::NAME,
                if add { "added" } else { "removed" }
            );
            Ok(())
        }
        Err(err @ (CatalogError::AlreadyExists { .. } | CatalogError::NotFound { .. })) => {
            log::warn!("{err}: {owner_id} -> {target_id}");
            Err(err)
        }
        Err(err) => Err(report(err)),
    }
}

pub fn toggle_favorite<S>(repo: &S, user_id: i32, recipe_id: i32, add: bool) -> CatalogResult<()>
where
    S: MembershipStore<Favorites> + ?Sized,
{
    toggle_membership::<Favorites, S>(repo, user_id, recipe_id, add)
}

pub fn toggle_shopping_cart<S>(
    repo: &S,
    user_id: i32,
    recipe_id: i32,
    add: bool,
) -> CatalogResult<()>
where
    S: MembershipStore<ShoppingCart> + ?Sized,
{
    toggle_membership::<ShoppingCart, S>(repo, user_id, recipe_id, add)
}

pub fn toggle_subscription<S>(
    repo: &S,
    subscriber_id: i32,
    author_id: i32,
    add: bool,
) -> CatalogResult<()>
where
    S: MembershipStore<Subscriptions> + ?Sized,
{
    toggle_membership::<Subscriptions, S>(repo, subscriber_id, author_id, add)
}

/// One followed author with a preview of their newest recipes.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub author: User,
    pub recipes: Vec<Recipe>,
    pub recipes_count: usize,
}

/// Authors followed by `subscriber_id`, ordered by author id, each with up
/// to `recipes_limit` of their newest recipes.
pub fn list_subscriptions<S>(
    repo: &S,
    subscriber_id: i32,
    recipes_limit: Option<i64>,
) -> CatalogResult<Vec<SubscriptionView>>
where
    S: MembershipStore<Subscriptions> + UserReader + RecipeReader + ?Sized,
{
    let entries = MembershipStore::<Subscriptions>::list_members(repo, subscriber_id)
        .map_err(report)?;

    let mut views = Vec::with_capacity(entries.len());
    for entry in entries {
        let author_id = entry.key.author_id;

        let Some(author) = repo.get_user_by_id(author_id).map_err(report)? else {
            continue;
        };

        let mut query = RecipeListQuery::new().author_id(author_id);
        if let Some(limit) = recipes_limit {
            query = query.limit(limit);
        }

        let (recipes_count, recipes) = repo.list_recipes(query).map_err(report)?;

        views.push(SubscriptionView {
            author,
            recipes,
            recipes_count,
        });
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::NaiveDateTime;

    use crate::domain::membership::{MembershipEntry, SubscriberAuthor, UserRecipe};

    /// In-memory relation store keyed by raw pairs.
    #[derive(Default)]
    struct FakeStore {
        pairs: Mutex<Vec<(i32, i32)>>,
    }

    impl FakeStore {
        fn add<R: Relation>(&self, key: R::Key) -> CatalogResult<MembershipEntry<R::Key>> {
            R::validate(&key)?;
            let pair = R::parts(&key);
            let mut pairs = self.pairs.lock().expect("lock");
            if pairs.contains(&pair) {
                return Err(CatalogError::AlreadyExists { relation: R::NAME });
            }
            pairs.push(pair);
            Ok(MembershipEntry {
                id: pairs.len() as i32,
                key,
                created_at: NaiveDateTime::default(),
            })
        }

        fn remove<R: Relation>(&self, key: R::Key) -> CatalogResult<()> {
            let pair = R::parts(&key);
            let mut pairs = self.pairs.lock().expect("lock");
            let before = pairs.len();
            pairs.retain(|existing| *existing != pair);
            if pairs.len() == before {
                return Err(CatalogError::NotFound { relation: R::NAME });
            }
            Ok(())
        }

        fn has(&self, pair: (i32, i32)) -> bool {
            self.pairs.lock().expect("lock").contains(&pair)
        }
    }

    impl MembershipStore<Favorites> for FakeStore {
        fn add_member(&self, key: UserRecipe) -> CatalogResult<MembershipEntry<UserRecipe>> {
            self.add::<Favorites>(key)
        }

        fn remove_member(&self, key: UserRecipe) -> CatalogResult<()> {
            self.remove::<Favorites>(key)
        }

        fn has_member(&self, key: UserRecipe) -> CatalogResult<bool> {
            Ok(self.has(Favorites::parts(&key)))
        }

        fn list_members(&self, _owner_id: i32) -> CatalogResult<Vec<MembershipEntry<UserRecipe>>> {
            Ok(Vec::new())
        }
    }

    impl MembershipStore<Subscriptions> for FakeStore {
        fn add_member(
            &self,
            key: SubscriberAuthor,
        ) -> CatalogResult<MembershipEntry<SubscriberAuthor>> {
            self.add::<Subscriptions>(key)
        }

        fn remove_member(&self, key: SubscriberAuthor) -> CatalogResult<()> {
            self.remove::<Subscriptions>(key)
        }

        fn has_member(&self, key: SubscriberAuthor) -> CatalogResult<bool> {
            Ok(self.has(Subscriptions::parts(&key)))
        }

        fn list_members(
            &self,
            _owner_id: i32,
        ) -> CatalogResult<Vec<MembershipEntry<SubscriberAuthor>>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn repeated_add_is_a_conflict() {
        let store = FakeStore::default();

        assert!(toggle_favorite(&store, 1, 2, true).is_ok());
        let second = toggle_favorite(&store, 1, 2, true);

        assert!(matches!(
            second,
            Err(CatalogError::AlreadyExists { relation: "favorites" })
        ));
    }

    #[test]
    fn removing_absent_pair_is_not_found() {
        let store = FakeStore::default();

        let result = toggle_favorite(&store, 1, 2, false);

        assert!(matches!(
            result,
            Err(CatalogError::NotFound { relation: "favorites" })
        ));
    }

    #[test]
    fn add_then_remove_clears_membership() {
        let store = FakeStore::default();

        toggle_favorite(&store, 3, 4, true).expect("added");
        toggle_favorite(&store, 3, 4, false).expect("removed");

        assert!(!store.has((3, 4)));
    }

    #[test]
    fn self_subscription_is_rejected_before_storage() {
        let store = FakeStore::default();

        let result = toggle_subscription(&store, 5, 5, true);

        assert!(matches!(result, Err(CatalogError::SelfSubscription)));
        assert!(!store.has((5, 5)));
    }
}
