pub mod db;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;

/// Lower bound for cooking times and ingredient amounts.
pub const MIN_VALUE: i32 = 1;
/// Upper bound for cooking times and ingredient amounts.
pub const MAX_VALUE: i32 = 32000;
/// Maximum length of names, measurement units and slugs.
pub const MAX_TEXT_LENGTH: usize = 200;
