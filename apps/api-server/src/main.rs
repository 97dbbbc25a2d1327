//! # Blogly API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use blogly_infra::Database;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::LogFormat;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(LogFormat::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blogly API Server on {}:{}",
        config.host,
        config.port
    );

    let db = Database::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.auto_migrate {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let state = AppState::new(db, config.recent_posts_limit);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
