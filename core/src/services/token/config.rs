//! Configuration for the token service

use uh_shared::TokenConfig;

/// Configuration for the token service
#[derive(Debug, Clone, Default)]
pub struct TokenServiceConfig {
    /// Token lifetime in minutes; `None` issues tokens that never expire
    pub expiry_minutes: Option<i64>,
}

impl From<&TokenConfig> for TokenServiceConfig {
    fn from(config: &TokenConfig) -> Self {
        Self {
            expiry_minutes: config.expiry_minutes.filter(|minutes| *minutes > 0),
        }
    }
}
