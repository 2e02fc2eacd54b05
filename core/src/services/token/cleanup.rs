//! Periodic removal of expired personal access tokens

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

use super::service::TokenService;

/// Configuration for token cleanup
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Outcome of one cleanup cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupResult {
    pub expired_tokens_deleted: usize,
}

/// Deletes expired tokens on an interval
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    tokens: Arc<TokenService<R>>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + 'static> TokenCleanupService<R> {
    pub fn new(tokens: Arc<TokenService<R>>, config: TokenCleanupConfig) -> Self {
        Self { tokens, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let deleted = self.tokens.purge_expired().await?;
        if deleted > 0 {
            info!(deleted, "Deleted expired access tokens");
        }

        Ok(CleanupResult {
            expired_tokens_deleted: deleted,
        })
    }

    /// Spawns a tokio task that runs cleanup at regular intervals
    ///
    /// Does nothing when cleanup is disabled or tokens never expire.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled || self.tokens.config().expiry_minutes.is_none() {
            warn!("Token cleanup is disabled");
            return None;
        }

        let period = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(interval_seconds = period.as_secs(), "Starting token cleanup task");
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!("Token cleanup failed: {}", e);
                }
            }
        }))
    }
}
