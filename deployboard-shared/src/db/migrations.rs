/// Database migration runner
///
/// The schema (customers, deployments, users, revenue) ships as sqlx migrations
/// in the workspace `migrations/` directory and is embedded at compile time.

use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Applies every migration that has not run yet
///
/// # Errors
///
/// Returns an error if a migration fails to apply or the migrations table
/// cannot be read.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Migration failed");
            Err(e)
        }
    }
}

/// Creates the database named in `database_url` if it does not exist
///
/// Intended for development and test setups.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
    } else {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    }

    Ok(())
}

/// Drops the database named in `database_url` if it exists
///
/// Deletes all data. Used to tear down scratch databases in tests. Sessions
/// still connected to the database are terminated first, so backends that
/// outlive a closed pool do not block the drop.
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        warn!("Dropping database");
        Postgres::force_drop_database(database_url).await?;
    }

    Ok(())
}
