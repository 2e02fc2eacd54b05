//! Authentication configuration: password hashing, access tokens and login throttling

use serde::{Deserialize, Serialize};

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Personal access token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Name recorded on tokens issued by the login endpoint
    #[serde(default = "default_token_name")]
    pub name: String,

    /// Token lifetime in minutes; `None` means tokens live until revoked
    #[serde(default)]
    pub expiry_minutes: Option<i64>,

    /// How often expired tokens are purged, in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_token_name(),
            expiry_minutes: None,
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl TokenConfig {
    /// Set the token lifetime in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = Some(minutes);
        self
    }
}

/// Failed-login throttling configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Failed attempts allowed per email and IP before lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds before the failed-attempt counter resets
    #[serde(default = "default_decay_seconds")]
    pub decay_seconds: i64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            decay_seconds: default_decay_seconds(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub password: PasswordConfig,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub throttle: ThrottleConfig,
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_token_name() -> String {
    String::from("api-token")
}

fn default_cleanup_interval() -> u64 {
    3600
}

fn default_max_attempts() -> u32 {
    5
}

fn default_decay_seconds() -> i64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert_eq!(config.password.bcrypt_cost, 12);
        assert_eq!(config.token.name, "api-token");
        assert!(config.token.expiry_minutes.is_none());
        assert_eq!(config.token.cleanup_interval_seconds, 3600);
        assert_eq!(config.throttle.max_attempts, 5);
        assert_eq!(config.throttle.decay_seconds, 60);
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::default().with_expiry_minutes(120);
        assert_eq!(config.expiry_minutes, Some(120));
    }
}
