/**
 * Server Configuration
 *
 * This module loads server configuration from the environment and opens the
 * SQLite database.
 *
 * # Configuration Sources
 *
 * Every setting comes from an environment variable (optionally populated
 * from a `.env` file by the binary), with defaults suitable for local
 * development:
 *
 * | Variable            | Default                 |
 * |---------------------|-------------------------|
 * | `DATABASE_URL`      | `sqlite://taskboard.db` |
 * | `SERVER_PORT`       | `5000`                  |
 * | `JWT_SECRET`        | development fallback    |
 * | `JWT_EXPIRY_HOURS`  | `24`                    |
 * | `BCRYPT_COST`       | `bcrypt::DEFAULT_COST`  |
 * | `CORS_ORIGINS`      | `http://localhost:5173` |
 * | `ATOMIC_TASK_MOVES` | `true`                  |
 *
 * Unparseable values fall back to the default with a warning.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

const DEV_JWT_SECRET: &str = "taskboard-dev-secret-change-in-production";

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bcrypt_cost: u32,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
    /// Apply batch moves inside a single transaction
    pub atomic_task_moves: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            atomic_task_moves: true,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
            defaults.jwt_secret.clone()
        });

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .ok()
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_origins);

        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            port: env_or("SERVER_PORT", defaults.port),
            jwt_secret,
            jwt_expiry_hours: env_or("JWT_EXPIRY_HOURS", defaults.jwt_expiry_hours),
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
            cors_origins,
            atomic_task_moves: env_or("ATOMIC_TASK_MOVES", defaults.atomic_task_moves),
        }
    }
}

/// Read and parse an environment variable, keeping `default` when absent or invalid
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}. Using {}.", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}

/// Open the SQLite database and bring its schema up to date
///
/// The database file is created when missing and foreign keys are enforced
/// on every connection, so deleting a board cascades to its lists and tasks.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
