use mockall::mock;

use super::{
    CompositionWriter, IngredientLifecycle, IngredientReader, IngredientWriter, RecipeReader,
    RecipeWriter, ShoppingListReader, TagReader, TagWriter, UserReader,
};
use crate::domain::{
    composition::Composition,
    ingredient::{Ingredient, IngredientDeletion, IngredientListQuery, NewIngredient},
    recipe::{NewRecipe, Recipe, RecipeListQuery, UpdateRecipe},
    shopping_list::CartIngredientLine,
    tag::{NewTag, Tag},
    user::User,
};
use crate::errors::CatalogResult;

mock! {
    pub UserReader {}

    impl UserReader for UserReader {
        fn get_user_by_id(&self, id: i32) -> CatalogResult<Option<User>>;
    }
}

mock! {
    pub TagReader {}

    impl TagReader for TagReader {
        fn get_tag_by_id(&self, id: i32) -> CatalogResult<Option<Tag>>;
        fn list_tags(&self) -> CatalogResult<Vec<Tag>>;
    }
}

mock! {
    pub TagWriter {}

    impl TagWriter for TagWriter {
        fn create_tag(&self, new_tag: &NewTag) -> CatalogResult<Tag>;
    }
}

mock! {
    pub IngredientReader {}

    impl IngredientReader for IngredientReader {
        fn get_ingredient_by_id(&self, id: i32) -> CatalogResult<Option<Ingredient>>;
        fn list_ingredients(&self, query: IngredientListQuery) -> CatalogResult<Vec<Ingredient>>;
    }
}

mock! {
    pub IngredientWriter {}

    impl IngredientWriter for IngredientWriter {
        fn create_ingredient(&self, new_ingredient: &NewIngredient) -> CatalogResult<Ingredient>;
    }
}

mock! {
    pub IngredientLifecycle {}

    impl IngredientLifecycle for IngredientLifecycle {
        fn delete_ingredient(&self, id: i32) -> CatalogResult<IngredientDeletion>;
        fn unarchive_ingredient(&self, id: i32) -> CatalogResult<Ingredient>;
        fn purge_ingredient(&self, id: i32) -> CatalogResult<()>;
        fn discard_archive_record(&self, ingredient_id: i32) -> CatalogResult<()>;
    }
}

mock! {
    pub RecipeReader {}

    impl RecipeReader for RecipeReader {
        fn get_recipe_by_id(&self, id: i32) -> CatalogResult<Option<Recipe>>;
        fn list_recipes(&self, query: RecipeListQuery) -> CatalogResult<(usize, Vec<Recipe>)>;
    }
}

mock! {
    pub RecipeWriter {}

    impl RecipeWriter for RecipeWriter {
        fn create_recipe(&self, new_recipe: &NewRecipe, composition: &Composition) -> CatalogResult<Recipe>;
        fn update_recipe(&self, recipe_id: i32, updates: &UpdateRecipe, composition: &Composition) -> CatalogResult<Recipe>;
        fn delete_recipe(&self, recipe_id: i32) -> CatalogResult<()>;
    }
}

mock! {
    pub CompositionWriter {}

    impl CompositionWriter for CompositionWriter {
        fn set_composition(&self, recipe_id: i32, composition: &Composition) -> CatalogResult<()>;
    }
}

mock! {
    pub ShoppingListReader {}

    impl ShoppingListReader for ShoppingListReader {
        fn list_cart_ingredient_lines(&self, user_id: i32) -> CatalogResult<Vec<CartIngredientLine>>;
    }
}
