//! Database connection management and repository implementations.

mod connections;
mod memory;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryBlogPostRepository, InMemoryUserRepository};
pub use postgres_repo::{PostgresBlogPostRepository, PostgresUserRepository};

#[cfg(test)]
mod tests;
