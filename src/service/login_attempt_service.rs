use crate::config::parameter;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Failure counter for one login key (normalized email). The window restarts
/// on every failure; entries past expires_at count as reset.
#[derive(Clone, Debug)]
struct AttemptEntry {
    count: u32,
    expires_at: DateTime<Utc>,
}

/// Keyed login-failure store. A trait so the in-memory implementation can be
/// swapped for a shared store without touching the auth flow.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Records a failed login and returns the current consecutive count.
    async fn record_failure(&self, key: &str) -> u32;
    /// Clears the counter after a successful login.
    async fn clear(&self, key: &str);
    async fn is_blocked(&self, key: &str) -> bool;
    /// Removes entries whose window has lapsed; returns how many.
    async fn cleanup_expired(&self) -> usize;
}

pub struct InMemoryAttemptStore {
    attempts: Arc<DashMap<String, AttemptEntry>>,
    max_attempts: u32,
    block_duration_minutes: i64,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::with_limits(
            parameter::get_u64("LOGIN_MAX_ATTEMPTS") as u32,
            parameter::get_i64("LOGIN_BLOCK_DURATION_MINUTES"),
        )
    }

    pub fn with_limits(max_attempts: u32, block_duration_minutes: i64) -> Self {
        Self {
            attempts: Arc::new(DashMap::new()),
            max_attempts,
            block_duration_minutes,
        }
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn record_failure(&self, key: &str) -> u32 {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.block_duration_minutes);

        let mut entry = self.attempts.entry(key.to_string()).or_insert(AttemptEntry {
            count: 0,
            expires_at,
        });

        if entry.expires_at <= now {
            entry.count = 0;
        }
        entry.count += 1;
        entry.expires_at = expires_at;

        let count = entry.count;
        drop(entry);

        if count >= self.max_attempts {
            warn!("Login key blocked after {} failed attempts", count);
        }
        count
    }

    async fn clear(&self, key: &str) {
        self.attempts.remove(key);
    }

    async fn is_blocked(&self, key: &str) -> bool {
        match self.attempts.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => entry.count >= self.max_attempts,
            _ => false,
        }
    }

    async fn cleanup_expired(&self) -> usize {
        let now = Utc::now();

        let keys_to_remove: Vec<String> = self
            .attempts
            .iter()
            .filter(|entry| entry.value().expires_at <= now)
            .map(|entry| entry.key().clone())
            .collect();

        let mut cleaned_count = 0;
        for key in keys_to_remove {
            if self.attempts.remove(&key).is_some() {
                cleaned_count += 1;
            }
        }

        cleaned_count
    }
}

/// Periodic sweep of lapsed attempt windows; stops when the shutdown token
/// fires.
pub fn start_cleanup_task(
    store: Arc<InMemoryAttemptStore>,
    interval_minutes: u64,
    shutdown_token: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(interval_minutes * 60));
        // The first tick fires immediately; skip it.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let cleaned = store.cleanup_expired().await;
                    if cleaned > 0 {
                        info!("Cleaned {} expired login-attempt entries", cleaned);
                    }
                }
                _ = shutdown_token.cancelled() => {
                    info!("Login-attempt cleanup task shutting down");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocks_after_max_attempts() {
        let store = InMemoryAttemptStore::with_limits(3, 30);

        assert!(!store.is_blocked("a@x.com").await);
        store.record_failure("a@x.com").await;
        store.record_failure("a@x.com").await;
        assert!(!store.is_blocked("a@x.com").await);
        store.record_failure("a@x.com").await;
        assert!(store.is_blocked("a@x.com").await);

        // Other keys are unaffected.
        assert!(!store.is_blocked("b@x.com").await);
    }

    #[tokio::test]
    async fn clear_resets_the_counter() {
        let store = InMemoryAttemptStore::with_limits(2, 30);

        store.record_failure("a@x.com").await;
        store.record_failure("a@x.com").await;
        assert!(store.is_blocked("a@x.com").await);

        store.clear("a@x.com").await;
        assert!(!store.is_blocked("a@x.com").await);
        assert_eq!(store.record_failure("a@x.com").await, 1);
    }

    #[tokio::test]
    async fn lapsed_window_unblocks() {
        let store = InMemoryAttemptStore::with_limits(1, 30);
        store.record_failure("a@x.com").await;
        assert!(store.is_blocked("a@x.com").await);

        // Force the window into the past.
        if let Some(mut entry) = store.attempts.get_mut("a@x.com") {
            entry.expires_at = Utc::now() - Duration::minutes(1);
        }

        assert!(!store.is_blocked("a@x.com").await);
        // A new failure starts a fresh count.
        assert_eq!(store.record_failure("a@x.com").await, 1);
    }

    #[tokio::test]
    async fn cleanup_removes_only_lapsed_entries() {
        let store = InMemoryAttemptStore::with_limits(5, 30);

        for key in ["a@x.com", "b@x.com", "c@x.com"] {
            store.record_failure(key).await;
        }
        for key in ["a@x.com", "c@x.com"] {
            if let Some(mut entry) = store.attempts.get_mut(key) {
                entry.expires_at = Utc::now() - Duration::minutes(1);
            }
        }

        let cleaned = store.cleanup_expired().await;
        assert_eq!(cleaned, 2);
        assert_eq!(store.attempts.len(), 1);
    }
}
