/**
 * Server Configuration
 *
 * This module handles loading server configuration from the environment and
 * opening the SQLite database that backs the comment store.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (the binary loads a
 * `.env` file first if present), with defaults suited to local development:
 *
 * | Variable | Default |
 * |---|---|
 * | `DATABASE_URL` | `sqlite://xfsocial.db` |
 * | `SERVER_PORT` | `3000` |
 * | `JWT_SECRET` | development secret (logged as a warning) |
 * | `RATE_LIMIT_MAX_REQUESTS` | `30` |
 * | `RATE_LIMIT_WINDOW_SECS` | `60` |
 * | `COMMENT_PAGE_DEFAULT` | `20` |
 * | `COMMENT_PAGE_MAX` | `100` |
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::shared::config::{AppConfig, ConfigError};

const DEV_JWT_SECRET: &str = "xfsocial-dev-secret-change-in-production";

/// How long a connection waits for the store's write lock before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    pub port: u16,
    /// HS256 secret used to verify bearer tokens
    pub jwt_secret: String,
    /// Mutations allowed per user per window
    pub rate_limit_max_requests: u32,
    pub rate_limit_window: Duration,
    /// Engine tunables
    pub engine: AppConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://xfsocial.db".to_string(),
            port: 3000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            rate_limit_max_requests: 30,
            rate_limit_window: Duration::from_secs(60),
            engine: AppConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set. Using the development secret.");
                defaults.jwt_secret
            }
        };

        let engine = AppConfig::builder()
            .default_page_size(env_or("COMMENT_PAGE_DEFAULT", defaults.engine.default_page_size)?)
            .max_page_size(env_or("COMMENT_PAGE_MAX", defaults.engine.max_page_size)?)
            .build()?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port: env_or("SERVER_PORT", defaults.port)?,
            jwt_secret,
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", defaults.rate_limit_max_requests)?,
            rate_limit_window: Duration::from_secs(env_or(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window.as_secs(),
            )?),
            engine,
        })
    }
}

fn env_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Open the database pool and run migrations
///
/// The pool uses WAL journaling and a busy timeout so concurrent writers
/// queue on the write lock instead of failing immediately.
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(BUSY_TIMEOUT)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Open a private in-memory database
///
/// A single connection that is never recycled, since every new in-memory
/// connection would see an empty database.
pub async fn memory_database() -> Result<SqlitePool, BackendError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), BackendError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
