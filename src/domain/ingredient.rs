use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::CatalogError;

/// Lifecycle state of an ingredient.
///
/// ```text
/// Active --delete (referenced)--> Archived --unarchive--> Active
///   |                                |
///   +--delete (unreferenced)--> Purged <--purge / discard record (unreferenced)
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngredientState {
    /// Visible in the catalog and selectable for new recipes.
    #[default]
    Active,
    /// Hidden from catalog browsing but still referenced by existing recipes.
    Archived,
}

/// What a delete request does to an ingredient in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStep {
    /// Nothing references the ingredient: remove the row.
    Purge,
    /// Recipes still reference the ingredient: hide it and record the archival.
    Archive,
    /// Already archived and still referenced: nothing changes.
    Keep,
}

impl IngredientState {
    pub fn as_str(self) -> &'static str {
        match self {
            IngredientState::Active => "active",
            IngredientState::Archived => "archived",
        }
    }

    /// Decide the transition for a delete request given the number of
    /// composition entries that reference the ingredient.
    pub fn delete_step(self, references: i64) -> DeleteStep {
        match (self, references) {
            (_, 0) => DeleteStep::Purge,
            (IngredientState::Active, _) => DeleteStep::Archive,
            (IngredientState::Archived, _) => DeleteStep::Keep,
        }
    }

    /// Only archived ingredients can be restored.
    pub fn can_unarchive(self) -> bool {
        self == IngredientState::Archived
    }
}

impl From<IngredientState> for &'static str {
    fn from(value: IngredientState) -> Self {
        value.as_str()
    }
}

impl TryFrom<&str> for IngredientState {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(IngredientState::Active),
            "archived" => Ok(IngredientState::Archived),
            other => Err(CatalogError::StorageFailure(format!(
                "unknown ingredient state `{other}`"
            ))),
        }
    }
}

/// Domain representation of an ingredient. Identity is `(name, measurement_unit)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Unique identifier of the ingredient.
    pub id: i32,
    /// Human-readable name of the ingredient.
    pub name: String,
    /// Unit the amounts of this ingredient are measured in.
    pub measurement_unit: String,
    /// Current lifecycle state.
    pub state: IngredientState,
    /// When the ingredient was archived, present only while archived.
    pub archived_at: Option<NaiveDateTime>,
    /// Timestamp for when the ingredient record was created.
    pub created_at: NaiveDateTime,
}

impl Ingredient {
    pub fn is_archived(&self) -> bool {
        self.state == IngredientState::Archived
    }
}

/// Payload required to insert a new ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl NewIngredient {
    /// Construct a new ingredient payload with trimmed fields.
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            measurement_unit: measurement_unit.into().trim().to_string(),
        }
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientDeletion {
    /// The ingredient row was removed.
    Purged,
    /// The ingredient is still referenced and now (or already) archived.
    Archived(Ingredient),
}

/// Query definition used to browse ingredients.
#[derive(Debug, Clone)]
pub struct IngredientListQuery {
    /// Case-insensitive prefix applied to the ingredient name.
    pub name_prefix: Option<String>,
    /// State to restrict the listing to; `None` lists every state.
    pub state: Option<IngredientState>,
}

impl IngredientListQuery {
    /// Catalog browsing query: active ingredients only.
    pub fn new() -> Self {
        Self {
            name_prefix: None,
            state: Some(IngredientState::Active),
        }
    }

    /// Filter the results to names starting with `prefix`.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    /// Restrict the listing to archived ingredients.
    pub fn archived_only(mut self) -> Self {
        self.state = Some(IngredientState::Archived);
        self
    }

    /// List ingredients regardless of their state.
    pub fn include_archived(mut self) -> Self {
        self.state = None;
        self
    }
}

impl Default for IngredientListQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreferenced_ingredients_are_purged_in_any_state() {
        assert_eq!(IngredientState::Active.delete_step(0), DeleteStep::Purge);
        assert_eq!(IngredientState::Archived.delete_step(0), DeleteStep::Purge);
    }

    #[test]
    fn referenced_active_ingredient_is_archived() {
        assert_eq!(IngredientState::Active.delete_step(3), DeleteStep::Archive);
    }

    #[test]
    fn referenced_archived_ingredient_is_kept() {
        assert_eq!(IngredientState::Archived.delete_step(1), DeleteStep::Keep);
    }

    #[test]
    fn only_archived_ingredients_can_be_unarchived() {
        assert!(IngredientState::Archived.can_unarchive());
        assert!(!IngredientState::Active.can_unarchive());
    }

    #[test]
    fn state_round_trips_through_storage_text() {
        for state in [IngredientState::Active, IngredientState::Archived] {
            let stored: &'static str = state.into();
            assert_eq!(IngredientState::try_from(stored).ok(), Some(state));
        }

        assert!(IngredientState::try_from("deleted").is_err());
    }

    #[test]
    fn default_listing_hides_archived() {
        let query = IngredientListQuery::new();
        assert_eq!(query.state, Some(IngredientState::Active));

        let query = IngredientListQuery::new().include_archived();
        assert_eq!(query.state, None);
    }
}
