mod common;

use recipe_catalog::domain::ingredient::{IngredientDeletion, IngredientState};
use recipe_catalog::errors::CatalogError;
use recipe_catalog::repository::{IngredientReader, RecipeWriter};
use recipe_catalog::services::ingredients;

#[test]
fn referenced_ingredient_is_archived_and_hidden() {
    let test_db = common::TestDb::new("lifecycle_archive.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let sugar = common::create_ingredient(&repo, "sugar", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    let recipe = common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    let outcome = ingredients::delete_ingredient(&repo, salt.id).expect("deleted");

    let IngredientDeletion::Archived(archived) = outcome else {
        panic!("expected archival");
    };
    assert_eq!(archived.state, IngredientState::Archived);
    assert!(archived.archived_at.is_some());

    let listed: Vec<i32> = ingredients::list_ingredients(&repo, None)
        .expect("listing")
        .iter()
        .map(|ingredient| ingredient.id)
        .collect();
    assert_eq!(listed, vec![sugar.id]);

    let archived_listing = ingredients::list_archived_ingredients(&repo).expect("archived");
    assert_eq!(archived_listing.len(), 1);
    assert_eq!(archived_listing[0].id, salt.id);

    // The recipe keeps pointing at the same ingredient row.
    let stored = recipe_catalog::repository::RecipeReader::get_recipe_by_id(&repo, recipe.id)
        .expect("lookup")
        .expect("recipe");
    assert_eq!(stored.ingredients[0].ingredient_id, salt.id);
    assert_eq!(stored.ingredients[0].name, "salt");
}

#[test]
fn unreferenced_ingredient_is_purged_without_archive_record() {
    let test_db = common::TestDb::new("lifecycle_purge.db");
    let repo = test_db.repo();

    let salt = common::create_ingredient(&repo, "salt", "g");

    let outcome = ingredients::delete_ingredient(&repo, salt.id).expect("deleted");

    assert_eq!(outcome, IngredientDeletion::Purged);
    assert!(repo.get_ingredient_by_id(salt.id).expect("lookup").is_none());
    assert!(
        ingredients::list_archived_ingredients(&repo)
            .expect("archived")
            .is_empty()
    );
}

#[test]
fn deleting_unknown_ingredient_is_not_found() {
    let test_db = common::TestDb::new("lifecycle_unknown.db");
    let repo = test_db.repo();

    let result = ingredients::delete_ingredient(&repo, 31);

    assert!(matches!(result, Err(CatalogError::IngredientNotFound(31))));
}

#[test]
fn unarchive_restores_ingredient() {
    let test_db = common::TestDb::new("lifecycle_unarchive.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    ingredients::delete_ingredient(&repo, salt.id).expect("archived");
    let restored = ingredients::unarchive_ingredient(&repo, salt.id).expect("restored");

    assert_eq!(restored.state, IngredientState::Active);
    assert!(restored.archived_at.is_none());
    assert_eq!(
        ingredients::list_ingredients(&repo, Some("SA"))
            .expect("listing")
            .len(),
        1
    );
    assert!(
        ingredients::list_archived_ingredients(&repo)
            .expect("archived")
            .is_empty()
    );
}

#[test]
fn unarchive_of_active_ingredient_fails() {
    let test_db = common::TestDb::new("lifecycle_not_archived.db");
    let repo = test_db.repo();

    let salt = common::create_ingredient(&repo, "salt", "g");

    let result = ingredients::unarchive_ingredient(&repo, salt.id);

    assert!(matches!(result, Err(CatalogError::NotArchived(id)) if id == salt.id));
}

#[test]
fn repeated_delete_of_referenced_archived_ingredient_keeps_it() {
    let test_db = common::TestDb::new("lifecycle_repeat_delete.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    let recipe = common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    ingredients::delete_ingredient(&repo, salt.id).expect("archived");
    let again = ingredients::delete_ingredient(&repo, salt.id).expect("kept");
    assert!(matches!(again, IngredientDeletion::Archived(ref ingredient) if ingredient.is_archived()));

    // Once the last recipe is gone the same request purges it.
    repo.delete_recipe(recipe.id).expect("recipe deleted");
    let last = ingredients::delete_ingredient(&repo, salt.id).expect("purged");
    assert_eq!(last, IngredientDeletion::Purged);
}

#[test]
fn purge_refuses_referenced_ingredient() {
    let test_db = common::TestDb::new("lifecycle_purge_in_use.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    let result = ingredients::purge_ingredient(&repo, salt.id);

    assert!(matches!(result, Err(CatalogError::IngredientInUse(id)) if id == salt.id));
    assert!(repo.get_ingredient_by_id(salt.id).expect("lookup").is_some());
}

#[test]
fn discarding_archive_record_purges_unreferenced_ingredient() {
    let test_db = common::TestDb::new("lifecycle_discard_purges.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let pepper = common::create_ingredient(&repo, "pepper", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    let recipe = common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    ingredients::delete_ingredient(&repo, salt.id).expect("archived");

    // Move the recipe away from salt; the ingredient stays archived.
    recipe_catalog::services::recipes::set_composition(
        &repo,
        recipe.id,
        vec![recipe_catalog::domain::composition::IngredientAmount::new(pepper.id, 1)],
        vec![lunch.id],
    )
    .expect("recomposed");
    let still_archived = ingredients::get_ingredient(&repo, salt.id).expect("ingredient");
    assert!(still_archived.is_archived());

    ingredients::discard_archive_record(&repo, salt.id).expect("discarded");

    assert!(repo.get_ingredient_by_id(salt.id).expect("lookup").is_none());
    assert!(
        ingredients::list_archived_ingredients(&repo)
            .expect("archived")
            .is_empty()
    );
}

#[test]
fn discarding_archive_record_of_referenced_ingredient_changes_nothing() {
    let test_db = common::TestDb::new("lifecycle_discard_in_use.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    ingredients::delete_ingredient(&repo, salt.id).expect("archived");

    let result = ingredients::discard_archive_record(&repo, salt.id);

    assert!(matches!(result, Err(CatalogError::IngredientInUse(_))));
    let kept = ingredients::get_ingredient(&repo, salt.id).expect("ingredient");
    assert!(kept.is_archived());
    assert!(kept.archived_at.is_some());
}

#[test]
fn discarding_record_of_active_ingredient_is_not_archived() {
    let test_db = common::TestDb::new("lifecycle_discard_active.db");
    let repo = test_db.repo();

    let salt = common::create_ingredient(&repo, "salt", "g");

    let result = ingredients::discard_archive_record(&repo, salt.id);

    assert!(matches!(result, Err(CatalogError::NotArchived(_))));
    assert!(repo.get_ingredient_by_id(salt.id).expect("lookup").is_some());
}

#[test]
fn archived_ingredient_can_still_be_used_in_compositions() {
    let test_db = common::TestDb::new("lifecycle_archived_in_composition.db");
    let repo = test_db.repo();

    let author = common::create_user(&repo, "author");
    let salt = common::create_ingredient(&repo, "salt", "g");
    let lunch = common::create_tag(&repo, "Lunch", "#00FF00", "lunch");
    common::create_recipe(&repo, author.id, "Soup", &[(salt.id, 5)], &[lunch.id]);

    ingredients::delete_ingredient(&repo, salt.id).expect("archived");

    let second = common::create_recipe(&repo, author.id, "Stew", &[(salt.id, 2)], &[lunch.id]);

    assert_eq!(second.ingredients[0].ingredient_id, salt.id);
}

#[test]
fn prefix_search_is_case_insensitive_and_literal() {
    let test_db = common::TestDb::new("lifecycle_prefix.db");
    let repo = test_db.repo();

    common::create_ingredient(&repo, "Salt", "g");
    common::create_ingredient(&repo, "salmon", "g");
    common::create_ingredient(&repo, "sugar", "g");
    common::create_ingredient(&repo, "50% cream", "ml");
    common::create_ingredient(&repo, "500 flour", "g");

    let names = |prefix: &str| -> Vec<String> {
        ingredients::list_ingredients(&repo, Some(prefix))
            .expect("listing")
            .into_iter()
            .map(|ingredient| ingredient.name)
            .collect()
    };

    // Binary collation sorts upper case first.
    assert_eq!(names("sal"), vec!["Salt", "salmon"]);
    assert_eq!(names("50%"), vec!["50% cream"]);
}
