//! API server configuration

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use inkwell_shared_config::{get_required_env, CommonConfig, DatabaseConfig, Environment};

/// Minimum required length for JWT_SECRET to be considered secure
const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Secret used when JWT_SECRET is unset outside production
const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-in-production";

/// Where user and post records are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// PostgreSQL via sqlx
    #[default]
    Postgres,
    /// Process-local maps, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Common configuration shared with other services
    pub common: CommonConfig,

    /// Server port (default: 8080)
    pub port: u16,

    /// Persistence backend (default: postgres)
    pub storage: StorageBackend,

    /// JWT secret for signing bearer tokens
    pub jwt_secret: String,

    /// JWT expiry (default: 1h)
    pub jwt_expiry: String,

    /// Argon2 memory cost in KiB (None keeps the library default)
    pub password_hash_memory_kib: Option<u32>,

    /// Argon2 iteration count (None keeps the library default)
    pub password_hash_iterations: Option<u32>,

    /// CORS allowed origins (optional)
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// In production mode, this function requires:
    /// - `JWT_SECRET`: Must be set and at least 32 characters long
    /// - `DATABASE_URL`: Must be explicitly set when the postgres backend is used
    ///
    /// In development/staging mode, sensible defaults are used for convenience.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        )
        .unwrap_or_default();
        let is_production = environment.is_production();

        let jwt_secret = Self::load_jwt_secret(is_production)?;

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(value) if !value.is_empty() => value
                .parse::<StorageBackend>()
                .map_err(|e| anyhow::anyhow!("Invalid STORAGE_BACKEND: {}", e))?,
            _ => StorageBackend::default(),
        };

        if is_production && storage == StorageBackend::Postgres {
            Self::validate_database_url()?;
        }

        let common = CommonConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        Ok(Self {
            common,

            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid PORT value")?,

            storage,

            jwt_secret,

            jwt_expiry: env::var("JWT_EXPIRY").unwrap_or_else(|_| "1h".to_string()),

            password_hash_memory_kib: parse_optional_env("PASSWORD_HASH_MEMORY_KIB")?,

            password_hash_iterations: parse_optional_env("PASSWORD_HASH_ITERATIONS")?,

            cors_allowed_origins: env::var("CORS_ORIGINS").ok().map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
        })
    }

    /// Load and validate JWT_SECRET
    ///
    /// In production:
    /// - JWT_SECRET must be explicitly set
    /// - Must be at least MIN_JWT_SECRET_LENGTH characters
    ///
    /// In development: falls back to a fixed insecure value
    fn load_jwt_secret(is_production: bool) -> Result<String> {
        match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => {
                if is_production && secret.len() < MIN_JWT_SECRET_LENGTH {
                    bail!(
                        "JWT_SECRET must be at least {} characters in production (got {})",
                        MIN_JWT_SECRET_LENGTH,
                        secret.len()
                    );
                }
                Ok(secret)
            }
            _ if is_production => {
                bail!(
                    "JWT_SECRET environment variable is required in production. \
                     Please set a secure secret of at least {} characters.",
                    MIN_JWT_SECRET_LENGTH
                );
            }
            _ => Ok(DEVELOPMENT_JWT_SECRET.to_string()),
        }
    }

    /// Validate that DATABASE_URL is explicitly set in production
    fn validate_database_url() -> Result<()> {
        get_required_env("DATABASE_URL").map(|_| ()).map_err(|_| {
            anyhow::anyhow!(
                "DATABASE_URL environment variable is required in production. \
                 Please set your PostgreSQL connection string."
            )
        })
    }

    /// Get database configuration
    pub fn database(&self) -> &DatabaseConfig {
        &self.common.database
    }

    /// Get environment mode
    pub fn environment(&self) -> Environment {
        self.common.environment
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.common.environment.is_production()
    }

    /// Whether the insecure development JWT secret is in use
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

/// Parse an optional numeric environment variable
///
/// Unset and empty variables both mean "not configured".
fn parse_optional_env(name: &str) -> Result<Option<u32>> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid {} value", name)),
        _ => Ok(None),
    }
}
