//! Toggle relations: favorites, shopping cart and subscriptions.
//!
//! The three relations share one behavior (a set of unique ordered pairs
//! where adding a present pair or removing an absent one is a conflict) and
//! differ only in their key type and storage table. [`Relation`] captures
//! the per-relation part; the add/remove logic is written once against it.

use std::fmt::Debug;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};

/// A unique-membership set over ordered `(owner, target)` pairs.
pub trait Relation {
    type Key: Copy + Debug + PartialEq + Send + Sync + 'static;

    /// Name reported in conflict errors.
    const NAME: &'static str;

    fn key(owner_id: i32, target_id: i32) -> Self::Key;

    fn parts(key: &Self::Key) -> (i32, i32);

    /// Key-level invariants checked before touching the store.
    fn validate(_key: &Self::Key) -> CatalogResult<()> {
        Ok(())
    }
}

/// Key for relations between a user and a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserRecipe {
    pub user_id: i32,
    pub recipe_id: i32,
}

impl UserRecipe {
    pub fn new(user_id: i32, recipe_id: i32) -> Self {
        Self { user_id, recipe_id }
    }
}

/// Key for a subscriber following an author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SubscriberAuthor {
    pub subscriber_id: i32,
    pub author_id: i32,
}

impl SubscriberAuthor {
    pub fn new(subscriber_id: i32, author_id: i32) -> Self {
        Self {
            subscriber_id,
            author_id,
        }
    }
}

/// Recipes a user marked as favorite.
#[derive(Debug, Clone, Copy)]
pub struct Favorites;

/// Recipes a user placed into the shopping cart.
#[derive(Debug, Clone, Copy)]
pub struct ShoppingCart;

/// Authors a user follows.
#[derive(Debug, Clone, Copy)]
pub struct Subscriptions;

impl Relation for Favorites {
    type Key = UserRecipe;

    const NAME: &'static str = "favorites";

    fn key(owner_id: i32, target_id: i32) -> Self::Key {
        UserRecipe::new(owner_id, target_id)
    }

    fn parts(key: &Self::Key) -> (i32, i32) {
        (key.user_id, key.recipe_id)
    }
}

impl Relation for ShoppingCart {
    type Key = UserRecipe;

    const NAME: &'static str = "shopping cart";

    fn key(owner_id: i32, target_id: i32) -> Self::Key {
        UserRecipe::new(owner_id, target_id)
    }

    fn parts(key: &Self::Key) -> (i32, i32) {
        (key.user_id, key.recipe_id)
    }
}

impl Relation for Subscriptions {
    type Key = SubscriberAuthor;

    const NAME: &'static str = "subscriptions";

    fn key(owner_id: i32, target_id: i32) -> Self::Key {
        SubscriberAuthor::new(owner_id, target_id)
    }

    fn parts(key: &Self::Key) -> (i32, i32) {
        (key.subscriber_id, key.author_id)
    }

    fn validate(key: &Self::Key) -> CatalogResult<()> {
        if key.subscriber_id == key.author_id {
            return Err(CatalogError::SelfSubscription);
        }
        Ok(())
    }
}

/// A stored membership pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MembershipEntry<K> {
    pub id: i32,
    pub key: K,
    pub created_at: NaiveDateTime,
}
