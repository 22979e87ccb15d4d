//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` (a `.env` file is honoured) and sets up its own logging.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
