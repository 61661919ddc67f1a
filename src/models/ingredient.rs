use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::ingredient::{
    Ingredient as DomainIngredient, IngredientState, NewIngredient as DomainNewIngredient,
};
use crate::errors::CatalogResult;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub state: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub measurement_unit: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::archived_ingredients,
    belongs_to(Ingredient, foreign_key = ingredient_id)
)]
pub struct ArchivedIngredient {
    pub id: i32,
    pub ingredient_id: i32,
    pub archived_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::archived_ingredients)]
pub struct NewArchivedIngredient {
    pub ingredient_id: i32,
    pub archived_at: NaiveDateTime,
}

impl Ingredient {
    pub fn into_domain(self, archive: Option<ArchivedIngredient>) -> CatalogResult<DomainIngredient> {
        let state = IngredientState::try_from(self.state.as_str())?;

        Ok(DomainIngredient {
            id: self.id,
            name: self.name,
            measurement_unit: self.measurement_unit,
            state,
            archived_at: archive.map(|record| record.archived_at),
            created_at: self.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewIngredient> for NewIngredient<'a> {
    fn from(value: &'a DomainNewIngredient) -> Self {
        Self {
            name: value.name.as_str(),
            measurement_unit: value.measurement_unit.as_str(),
        }
    }
}
