use diesel::prelude::*;

use crate::domain::composition::IngredientAmount;
use crate::domain::recipe::RecipeIngredient as DomainRecipeIngredient;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_ingredients)]
pub struct NewRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub amount: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipe_tags)]
pub struct NewRecipeTag {
    pub recipe_id: i32,
    pub tag_id: i32,
}

/// Composition entry joined with the name and unit of its ingredient.
#[derive(Debug, Clone, Queryable)]
pub struct ResolvedRecipeIngredient {
    pub recipe_id: i32,
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl NewRecipeIngredient {
    pub fn from_domain(recipe_id: i32, value: &IngredientAmount) -> Self {
        Self {
            recipe_id,
            ingredient_id: value.ingredient_id,
            amount: value.amount,
        }
    }
}

impl From<ResolvedRecipeIngredient> for DomainRecipeIngredient {
    fn from(value: ResolvedRecipeIngredient) -> Self {
        Self {
            ingredient_id: value.ingredient_id,
            name: value.name,
            measurement_unit: value.measurement_unit,
            amount: value.amount,
        }
    }
}
