//! # Blogly Infrastructure
//!
//! Concrete implementations of the ports defined in `blogly-core`:
//! SeaORM entities, the schema migration and the SQL repositories.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL via SeaORM
//! - `sqlite` - SQLite via SeaORM, used for local runs and tests

use std::sync::Arc;

use blogly_core::BlogService;

pub mod database;

pub use database::{Database, DatabaseConfig};

use database::{SqlPostRepository, SqlTagRepository, SqlUserRepository};

/// Wire a [`BlogService`] to the SQL repositories of `db`.
pub fn blog_service(db: &Database) -> BlogService {
    let conn = db.shared();
    BlogService::new(
        Arc::new(SqlUserRepository::new(conn.clone())),
        Arc::new(SqlPostRepository::new(conn.clone())),
        Arc::new(SqlTagRepository::new(conn)),
    )
}
