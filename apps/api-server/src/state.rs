//! Application state - shared across all handlers.

use blogly_core::BlogService;
use blogly_infra::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogService,
    pub db: Database,
    pub recent_posts_limit: u64,
}

impl AppState {
    /// Build the state around an open database.
    pub fn new(db: Database, recent_posts_limit: u64) -> Self {
        let blog = blogly_infra::blog_service(&db);
        tracing::info!("Application state initialized");

        Self {
            blog,
            db,
            recent_posts_limit,
        }
    }
}
