//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and applies or rolls back the Blogly schema:
//! `migration up`, `migration down`, `migration status`, `migration fresh`.

use blogly_infra::database::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // run_cli installs its own tracing subscriber
    cli::run_cli(Migrator).await;
}
