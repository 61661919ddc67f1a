pub mod composition;
pub mod ingredient;
pub mod membership;
pub mod recipe;
pub mod tag;
pub mod user;
