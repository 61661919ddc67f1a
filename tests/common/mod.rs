//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use pushkind_common::db::{DbPool, establish_connection_pool};
use tempfile::TempDir;

use recipe_catalog::db::run_migrations;
use recipe_catalog::domain::composition::{Composition, IngredientAmount};
use recipe_catalog::domain::ingredient::{Ingredient, NewIngredient};
use recipe_catalog::domain::recipe::{NewRecipe, Recipe};
use recipe_catalog::domain::tag::{NewTag, Tag};
use recipe_catalog::domain::user::{NewUser, User};
use recipe_catalog::repository::{
    DieselRepository, IngredientWriter, RecipeWriter, TagWriter, UserWriter,
};

/// Temporary database used in integration tests. The file lives in its own
/// directory that is removed on drop together with any `-wal`/`-shm` files.
pub struct TestDb {
    dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("Temporary path is not UTF-8.");

        let pool = establish_connection_pool(url).expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");

        TestDb { dir, path, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

pub fn create_user(repo: &DieselRepository, username: &str) -> User {
    repo.create_user(&NewUser::new(
        format!("{username}@example.com"),
        username,
        "Test",
        "User",
    ))
    .expect("user")
}

pub fn create_ingredient(repo: &DieselRepository, name: &str, unit: &str) -> Ingredient {
    repo.create_ingredient(&NewIngredient::new(name, unit))
        .expect("ingredient")
}

pub fn create_tag(repo: &DieselRepository, name: &str, color: &str, slug: &str) -> Tag {
    repo.create_tag(&NewTag::new(name, color, slug)).expect("tag")
}

/// Stores a recipe whose composition is `ingredients` (id, amount) plus `tags`.
pub fn create_recipe(
    repo: &DieselRepository,
    author_id: i32,
    name: &str,
    ingredients: &[(i32, i32)],
    tags: &[i32],
) -> Recipe {
    let composition = Composition::new(
        ingredients
            .iter()
            .map(|(id, amount)| IngredientAmount::new(*id, *amount))
            .collect(),
        tags.to_vec(),
    )
    .expect("composition");

    repo.create_recipe(
        &NewRecipe::new(author_id, name, "Cook it.", "recipes/images/dish.png", 30),
        &composition,
    )
    .expect("recipe")
}
