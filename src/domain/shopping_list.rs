use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One composition entry of a recipe found in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredientLine {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

impl CartIngredientLine {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, amount: i32) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Total amount of one ingredient across every recipe in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Merge cart lines by ingredient identity `(name, measurement_unit)`.
///
/// Lines are grouped by identity rather than row id, so two rows describing
/// the same ingredient still collapse into one item. Output is sorted by
/// name, then unit.
pub fn aggregate<I>(lines: I) -> Vec<ShoppingListItem>
where
    I: IntoIterator<Item = CartIngredientLine>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

    for line in lines {
        *totals.entry((line.name, line.measurement_unit)).or_default() += i64::from(line.amount);
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListItem {
            name,
            measurement_unit,
            total_amount,
        })
        .collect()
}
