/**
 * Server Configuration
 *
 * Loads `ServerConfig` from environment variables (a `.env` file is read by
 * the binary before this runs) and opens the SQLite pool.
 *
 * # Environment Variables
 *
 * | Variable                   | Default                          |
 * |----------------------------|----------------------------------|
 * | `DATABASE_URL`             | `sqlite://taskboard.db?mode=rwc` |
 * | `DATABASE_MAX_CONNECTIONS` | `1`                              |
 * | `SERVER_HOST`              | `0.0.0.0`                        |
 * | `SERVER_PORT`              | `5000`                           |
 * | `JWT_SECRET`               | required in release builds       |
 * | `TOKEN_TTL_HOURS`          | `24`                             |
 * | `BCRYPT_COST`              | `bcrypt::DEFAULT_COST`           |
 * | `STATIC_DIR`               | `public`                         |
 * | `SEED_DEMO_DATA`           | `false`                          |
 *
 * # Error Handling
 *
 * Unlike optional services, the database is required: a bad value or an
 * unreachable database stops startup with a `StartupError`.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://taskboard.db?mode=rwc";

/// Used only by debug builds when `JWT_SECRET` is unset
const DEV_JWT_SECRET: &str = "taskboard-development-secret-change-me";

/// How long SQLite waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} must be set")]
    Missing { name: &'static str },

    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Anything that can stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Runtime configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub static_dir: PathBuf,
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 1,
            host: "0.0.0.0".to_string(),
            port: 5000,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            static_dir: PathBuf::from("public"),
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                defaults.jwt_secret.clone()
            }
            _ => return Err(ConfigError::Missing { name: "JWT_SECRET" }),
        };

        let database_max_connections: u32 =
            parse_env("DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let token_ttl_hours: i64 = parse_env("TOKEN_TTL_HOURS", defaults.token_ttl_hours)?;
        if token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_HOURS",
                value: token_ttl_hours.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let bcrypt_cost: u32 = parse_env("BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections,
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: parse_env("SERVER_PORT", defaults.port)?,
            jwt_secret,
            token_ttl_hours,
            bcrypt_cost,
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            seed_demo_data: parse_env("SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }

    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse an optional environment variable, falling back to `default`
fn parse_env<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Builder used by tests and embedders that don't read the environment
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.config.database_max_connections = max.max(1);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl_hours(mut self, hours: i64) -> Self {
        self.config.token_ttl_hours = hours;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.static_dir = dir.into();
        self
    }

    pub fn seed_demo_data(mut self, seed: bool) -> Self {
        self.config.seed_demo_data = seed;
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}

/// Open the SQLite pool and run migrations
///
/// Foreign keys are switched on for every connection so board, list and card
/// deletes cascade.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, StartupError> {
    tracing::info!(url = %config.database_url, "Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = config.database_max_connections,
        "Database connection pool created successfully"
    );

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
