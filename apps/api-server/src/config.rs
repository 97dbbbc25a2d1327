//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blogly_core::DEFAULT_RECENT_POSTS;
use blogly_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    /// Number of posts on the homepage.
    pub recent_posts_limit: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/blogly".to_string());

        let mut database = DatabaseConfig::new(url);
        database.max_connections = parse_var("DB_MAX_CONNECTIONS").unwrap_or(20);
        database.min_connections = parse_var("DB_MIN_CONNECTIONS").unwrap_or(2);
        database.sqlx_logging = flag("DB_SQL_LOGGING", false);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            auto_migrate: flag("AUTO_MIGRATE", true),
            recent_posts_limit: parse_var("RECENT_POSTS_LIMIT").unwrap_or(DEFAULT_RECENT_POSTS),
        }
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// `false`/`0` switch a flag off, anything else switches it on.
fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v != "false" && v != "0")
        .unwrap_or(default)
}
