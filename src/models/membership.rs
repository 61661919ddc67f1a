use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::membership::{MembershipEntry, Relation};

/// Row of any membership table selected as `(id, owner, target, created_at)`.
#[derive(Debug, Clone, Queryable)]
pub struct MembershipRow {
    pub id: i32,
    pub owner_id: i32,
    pub target_id: i32,
    pub created_at: NaiveDateTime,
}

impl MembershipRow {
    pub fn into_entry<R: Relation>(self) -> MembershipEntry<R::Key> {
        MembershipEntry {
            id: self.id,
            key: R::key(self.owner_id, self.target_id),
            created_at: self.created_at,
        }
    }
}
