use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result type shared by the repository and service layers.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Every outcome a catalog operation can report to its caller.
///
/// All variants except [`CatalogError::StorageFailure`] are validation or
/// conflict outcomes and are never retried internally.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An ingredient with the same name and measurement unit already exists.
    #[error("ingredient `{name}` measured in `{measurement_unit}` already exists")]
    DuplicateIngredient {
        name: String,
        measurement_unit: String,
    },
    /// A tag with the same name, color or slug already exists.
    #[error("a tag with the same name, color or slug already exists")]
    DuplicateTag,
    /// A scalar field is outside of its allowed bounds.
    #[error("value of `{field}` is out of range")]
    ValueOutOfRange { field: String },
    /// A recipe must carry at least one ingredient and one tag.
    #[error("recipe needs at least one ingredient and one tag")]
    EmptyComposition,
    /// The same ingredient was supplied more than once for a recipe.
    #[error("ingredient {0} is listed more than once")]
    DuplicateIngredientInRecipe(i32),
    /// The same tag was supplied more than once for a recipe.
    #[error("tag {0} is listed more than once")]
    DuplicateTagInRecipe(i32),
    /// An ingredient amount is outside of its allowed bounds.
    #[error("amount {amount} of ingredient {ingredient_id} is out of range")]
    AmountOutOfRange { ingredient_id: i32, amount: i32 },
    #[error("ingredient {0} not found")]
    IngredientNotFound(i32),
    #[error("tag {0} not found")]
    TagNotFound(i32),
    #[error("recipe {0} not found")]
    RecipeNotFound(i32),
    #[error("user {0} not found")]
    UserNotFound(i32),
    /// Unarchive or archive-record removal requested for an active ingredient.
    #[error("ingredient {0} is not archived")]
    NotArchived(i32),
    /// Purge requested while composition entries still reference the ingredient.
    #[error("ingredient {0} is still used by recipes")]
    IngredientInUse(i32),
    /// The membership pair is already present in the relation.
    #[error("entry already exists in {relation}")]
    AlreadyExists { relation: &'static str },
    /// The membership pair is absent from the relation.
    #[error("entry not found in {relation}")]
    NotFound { relation: &'static str },
    #[error("users cannot subscribe to themselves")]
    SelfSubscription,
    /// Connectivity or constraint failure not covered by the checks above.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl CatalogError {
    /// Whether the error originates from the store rather than from validation.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, CatalogError::StorageFailure(_))
    }
}

impl From<DieselError> for CatalogError {
    fn from(value: DieselError) -> Self {
        CatalogError::StorageFailure(value.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for CatalogError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        CatalogError::StorageFailure(value.to_string())
    }
}

/// Translate a unique-constraint violation into `conflict`, leaving every
/// other store error as [`CatalogError::StorageFailure`].
pub(crate) fn on_unique_violation<F>(err: DieselError, conflict: F) -> CatalogError
where
    F: FnOnce() -> CatalogError,
{
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => conflict(),
        other => CatalogError::from(other),
    }
}
