//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Password hashing, access tokens and login throttling
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, PasswordConfig, ThrottleConfig, TokenConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Baseline configuration for an environment, before file and env overrides
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        };

        if environment.is_development() {
            config.server = ServerConfig::new("127.0.0.1", 8000);
            config.cors = CorsConfig::development();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = AppConfig::for_environment(Environment::Development);
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.cors.allowed_origins, vec!["*"]);
        assert!(!config.database.is_configured());
    }

    #[test]
    fn test_production_defaults() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(config.cors.allowed_origins.is_empty());
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"server": {"port": 9000}}"#).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.throttle.max_attempts, 5);
    }
}
