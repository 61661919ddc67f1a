use diesel::prelude::*;

use crate::domain::shopping_list::CartIngredientLine;
use crate::errors::CatalogResult;
use crate::repository::{DieselRepository, ShoppingListReader};

impl ShoppingListReader for DieselRepository {
    fn list_cart_ingredient_lines(&self, user_id: i32) -> CatalogResult<Vec<CartIngredientLine>> {
        use crate::schema::{ingredients, recipe_ingredients, shopping_cart_entries};

        let mut conn = self.conn()?;

        let rows = recipe_ingredients::table
            .inner_join(ingredients::table)
            .inner_join(
                shopping_cart_entries::table
                    .on(shopping_cart_entries::recipe_id.eq(recipe_ingredients::recipe_id)),
            )
            .filter(shopping_cart_entries::user_id.eq(user_id))
            .select((
                ingredients::name,
                ingredients::measurement_unit,
                recipe_ingredients::amount,
            ))
            .load::<(String, String, i32)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| {
                CartIngredientLine::new(name, measurement_unit, amount)
            })
            .collect())
    }
}
