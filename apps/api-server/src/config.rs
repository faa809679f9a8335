//! Application configuration loaded from environment variables.

use std::env;

use blogicum_infra::database::DatabaseConfig;
use blogicum_infra::{DEFAULT_JWT_SECRET, JwtConfig, PasswordCost};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub password_cost: PasswordCost,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(20),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            jwt: Self::jwt_from_env(),
            password_cost: Self::password_cost_from_env(),
        }
    }

    fn password_cost_from_env() -> PasswordCost {
        let defaults = PasswordCost::default();
        PasswordCost {
            memory_kib: parse_var("ARGON2_MEMORY_KIB").unwrap_or(defaults.memory_kib),
            iterations: parse_var("ARGON2_ITERATIONS").unwrap_or(defaults.iterations),
            parallelism: parse_var("ARGON2_PARALLELISM").unwrap_or(defaults.parallelism),
        }
    }

    fn jwt_from_env() -> JwtConfig {
        let defaults = JwtConfig::default();
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the built-in development secret");
            defaults.secret.clone()
        });

        if secret == DEFAULT_JWT_SECRET && is_production() {
            tracing::error!("JWT_SECRET must be changed in production");
        }

        JwtConfig {
            secret,
            expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                .unwrap_or(defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

fn is_production() -> bool {
    env::var("RUST_ENV")
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
