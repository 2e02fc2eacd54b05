//! Configuration for the session service

use uh_shared::AuthConfig;

#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Name recorded on tokens issued at login
    pub token_name: String,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            token_name: "api-token".to_string(),
        }
    }
}

impl From<&AuthConfig> for SessionServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            token_name: config.token.name.clone(),
        }
    }
}
