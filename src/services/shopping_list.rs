use crate::domain::shopping_list::{ShoppingListItem, aggregate};
use crate::repository::ShoppingListReader;
use crate::services::{CatalogResult, report};

/// Ingredient totals across every recipe in the user's cart, sorted by
/// name then unit. An empty cart yields an empty list.
pub fn get_shopping_list<R>(repo: &R, user_id: i32) -> CatalogResult<Vec<ShoppingListItem>>
where
    R: ShoppingListReader + ?Sized,
{
    let lines = repo.list_cart_ingredient_lines(user_id).map_err(report)?;
    Ok(aggregate(lines))
}
