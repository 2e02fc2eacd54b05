//! Failed-login throttling

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use uh_shared::ThrottleConfig;

/// Counts failed logins per key and locks the key out once a limit is reached
#[async_trait]
pub trait LoginThrottle: Send + Sync {
    /// Seconds until `key` may try again, or `None` if it is not locked out
    async fn available_in(&self, key: &str) -> Option<i64>;

    /// Record a failed attempt, returning the attempt count in the current window
    async fn hit(&self, key: &str) -> u32;

    /// Forget all attempts for `key`
    async fn clear(&self, key: &str);
}

/// Throttle key for a login attempt: lowercased email plus client address
pub fn throttle_key(email: &str, client_ip: &str) -> String {
    format!("{}|{}", email.trim().to_lowercase(), client_ip)
}

#[derive(Debug, Clone, Copy)]
struct Attempts {
    count: u32,
    resets_at: DateTime<Utc>,
}

/// Process-local throttle; each worker process counts independently
pub struct InMemoryLoginThrottle {
    max_attempts: u32,
    decay: Duration,
    attempts: RwLock<HashMap<String, Attempts>>,
}

impl InMemoryLoginThrottle {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            decay: Duration::seconds(config.decay_seconds.max(1)),
            attempts: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn available_in_at(&self, key: &str, now: DateTime<Utc>) -> Option<i64> {
        let attempts = self.attempts.read().await;
        let entry = attempts.get(key)?;
        if now >= entry.resets_at || entry.count < self.max_attempts {
            return None;
        }

        // Round up so a client never retries a fraction of a second too early.
        let remaining = entry.resets_at - now;
        let mut seconds = remaining.num_seconds();
        if remaining > Duration::seconds(seconds) {
            seconds += 1;
        }
        Some(seconds.max(1))
    }

    pub(crate) async fn hit_at(&self, key: &str, now: DateTime<Utc>) -> u32 {
        let mut attempts = self.attempts.write().await;
        attempts.retain(|_, entry| entry.resets_at > now);

        let entry = attempts.entry(key.to_string()).or_insert(Attempts {
            count: 0,
            resets_at: now + self.decay,
        });
        entry.count += 1;
        entry.count
    }
}

impl Default for InMemoryLoginThrottle {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

#[async_trait]
impl LoginThrottle for InMemoryLoginThrottle {
    async fn available_in(&self, key: &str) -> Option<i64> {
        self.available_in_at(key, Utc::now()).await
    }

    async fn hit(&self, key: &str) -> u32 {
        self.hit_at(key, Utc::now()).await
    }

    async fn clear(&self, key: &str) {
        self.attempts.write().await.remove(key);
    }
}
