//! SeaORM entities and their domain conversions.

pub mod blog_post;
pub mod user;
