use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, CatalogResult};
use crate::{MAX_VALUE, MIN_VALUE};

/// Requested amount of one ingredient in a recipe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

impl IngredientAmount {
    pub fn new(ingredient_id: i32, amount: i32) -> Self {
        Self {
            ingredient_id,
            amount,
        }
    }
}

/// Validated ingredient amounts and tags that replace a recipe's composition
/// as a whole.
///
/// Construction guarantees both lists are non-empty, free of repeated ids and
/// that every amount lies within `MIN_VALUE..=MAX_VALUE`. Whether the ids
/// exist is checked by the store inside the replacing transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    ingredients: Vec<IngredientAmount>,
    tag_ids: Vec<i32>,
}

impl Composition {
    pub fn new(ingredients: Vec<IngredientAmount>, tag_ids: Vec<i32>) -> CatalogResult<Self> {
        if ingredients.is_empty() || tag_ids.is_empty() {
            return Err(CatalogError::EmptyComposition);
        }

        let mut seen_ingredients = HashSet::with_capacity(ingredients.len());
        for item in &ingredients {
            if !seen_ingredients.insert(item.ingredient_id) {
                return Err(CatalogError::DuplicateIngredientInRecipe(item.ingredient_id));
            }
        }

        if let Some(item) = ingredients
            .iter()
            .find(|item| !(MIN_VALUE..=MAX_VALUE).contains(&item.amount))
        {
            return Err(CatalogError::AmountOutOfRange {
                ingredient_id: item.ingredient_id,
                amount: item.amount,
            });
        }

        let mut seen_tags = HashSet::with_capacity(tag_ids.len());
        for tag_id in &tag_ids {
            if !seen_tags.insert(*tag_id) {
                return Err(CatalogError::DuplicateTagInRecipe(*tag_id));
            }
        }

        Ok(Self {
            ingredients,
            tag_ids,
        })
    }

    pub fn ingredients(&self) -> &[IngredientAmount] {
        &self.ingredients
    }

    pub fn tag_ids(&self) -> &[i32] {
        &self.tag_ids
    }

    pub fn ingredient_ids(&self) -> Vec<i32> {
        self.ingredients
            .iter()
            .map(|item| item.ingredient_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_distinct_ingredients_and_tags() {
        let composition = Composition::new(
            vec![IngredientAmount::new(1, 5), IngredientAmount::new(2, MAX_VALUE)],
            vec![10, 11],
        )
        .expect("valid composition");

        assert_eq!(composition.ingredient_ids(), vec![1, 2]);
        assert_eq!(composition.tag_ids(), &[10, 11]);
    }

    #[test]
    fn rejects_missing_ingredients_or_tags() {
        let no_ingredients = Composition::new(Vec::new(), vec![1]);
        assert!(matches!(no_ingredients, Err(CatalogError::EmptyComposition)));

        let no_tags = Composition::new(vec![IngredientAmount::new(1, 1)], Vec::new());
        assert!(matches!(no_tags, Err(CatalogError::EmptyComposition)));
    }

    #[test]
    fn rejects_repeated_ingredient() {
        let result = Composition::new(
            vec![IngredientAmount::new(4, 1), IngredientAmount::new(4, 2)],
            vec![1],
        );

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateIngredientInRecipe(4))
        ));
    }

    #[test]
    fn rejects_repeated_tag() {
        let result = Composition::new(vec![IngredientAmount::new(1, 1)], vec![2, 3, 2]);

        assert!(matches!(result, Err(CatalogError::DuplicateTagInRecipe(2))));
    }

    #[test]
    fn rejects_amounts_outside_bounds() {
        let zero = Composition::new(vec![IngredientAmount::new(7, 0)], vec![1]);
        assert!(matches!(
            zero,
            Err(CatalogError::AmountOutOfRange {
                ingredient_id: 7,
                amount: 0
            })
        ));

        let too_much = Composition::new(vec![IngredientAmount::new(8, MAX_VALUE + 1)], vec![1]);
        assert!(matches!(
            too_much,
            Err(CatalogError::AmountOutOfRange { ingredient_id: 8, .. })
        ));
    }
}
