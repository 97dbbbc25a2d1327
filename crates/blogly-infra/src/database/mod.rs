//! Database connection management, schema and SQL repositories.

mod connections;
mod links;
mod sql_base;
mod sql_repo;

pub mod entity;
pub mod migration;

pub use connections::{Database, DatabaseConfig};
pub use sql_base::{RepoEntity, SqlBaseRepository};
pub use sql_repo::{SqlPostRepository, SqlTagRepository, SqlUserRepository};

#[cfg(test)]
mod tests;
