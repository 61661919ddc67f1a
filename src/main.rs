use std::env;

use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use recipe_catalog::db::run_migrations;

/// Prepares the catalog database: connects and applies pending migrations.
fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match run_migrations(&pool) {
        Ok(0) => log::info!("Database {database_url} is up to date"),
        Ok(applied) => log::info!("Applied {applied} migration(s) to {database_url}"),
        Err(e) => {
            log::error!("Failed to migrate database: {e}");
            std::process::exit(1);
        }
    }
}
