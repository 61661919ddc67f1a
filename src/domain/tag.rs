use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Label attached to recipes. Name, color and slug are each unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Human-readable name of the tag.
    pub name: String,
    /// Hex color in `#RRGGBB` form.
    pub color: String,
    /// URL-safe identifier used for filtering.
    pub slug: String,
    /// Timestamp for when the tag record was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to insert a new tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl NewTag {
    /// Construct a new tag payload with trimmed fields.
    pub fn new(name: impl Into<String>, color: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            color: color.into().trim().to_string(),
            slug: slug.into().trim().to_string(),
        }
    }
}
