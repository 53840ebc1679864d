/**
 * Server Configuration
 *
 * This module handles loading server configuration from environment
 * variables: the optional PostgreSQL mirror and the token secret.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup. A
 * missing or unreachable database disables persistence; the server then
 * runs purely in memory.
 */

use sqlx::PgPool;

/// Database configuration result
///
/// `Some(PgPool)` when the mirror is configured and reachable, `None`
/// otherwise.
pub type DatabaseConfig = Option<PgPool>;

/// Load the token verification secret
///
/// Falls back to a development secret when `JWT_SECRET` is unset.
pub fn load_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using development secret");
        "dev-secret-change-in-production".to_string()
    })
}

/// Load and initialize the database mirror pool
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Returns `None`
/// on any failure so the server can start without persistence.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Persistence will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Persistence will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
