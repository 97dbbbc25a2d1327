use std::sync::Arc;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use super::migration::Migrator;

/// Configuration for the blog database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Echo every SQL statement through sqlx's logger.
    pub sqlx_logging: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            sqlx_logging: false,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Connection pool to the blog database.
///
/// # Example
/// ```ignore
/// let db = Database::connect(&DatabaseConfig::new("postgres://localhost/blogly")).await?;
/// db.migrate().await?;
/// let users = SqlUserRepository::new(db.shared());
/// ```
#[derive(Clone)]
pub struct Database {
    conn: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the connection pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Initializing database connection...");

        let mut opts = ConnectOptions::new(&config.url);
        opts.connect_timeout(Duration::from_secs(10))
            .sqlx_logging(config.sqlx_logging);

        if config.is_in_memory() {
            // Every SQLite memory connection is its own database; keep exactly one alive.
            opts.max_connections(1).min_connections(1);
        } else {
            opts.max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .idle_timeout(Duration::from_secs(300));
        }

        let conn = SeaDatabase::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {})",
            if config.is_in_memory() { 1 } else { config.max_connections }
        );

        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Apply every pending schema migration.
    pub async fn migrate(&self) -> Result<(), DbErr> {
        Migrator::up(self.conn(), None).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Check that the database still answers.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Handle shared by the repositories built on this pool.
    pub fn shared(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.conn)
    }
}
