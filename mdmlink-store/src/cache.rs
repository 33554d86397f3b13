//! Process-wide token cache with per-entry expiry.
//!
//! The cache is constructor-injected into every adapter rather than living
//! in module-global state, so test cases run isolated. Cloning a
//! [`TokenCache`] yields a handle to the same underlying store.
//!
//! There is no single-flight de-duplication: two callers logging in for the
//! same vendor before either stores a token will both hit the network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::debug;

/// A cached value with its expiry deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Shared key/value store with TTL-based expiry.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the live value for `key`, evicting it if expired.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock().expect("token cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.value.clone()),
            Some(_) => {
                debug!(key, "evicting expired cache entry");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    pub fn set(&self, key: &str, value: impl Into<String>, ttl: Duration) {
        let entry = CacheEntry {
            value: value.into(),
            expires_at: Instant::now() + ttl,
        };
        self.entries
            .lock()
            .expect("token cache lock poisoned")
            .insert(key.to_string(), entry);
    }

    /// Drops the entry under `key`, if any.
    pub fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("token cache lock poisoned")
            .remove(key);
    }

    /// True when no live or expired entries are held.
    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .expect("token cache lock poisoned")
            .is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get() {
        let cache = TokenCache::new();
        cache.set("appleMDMToken", "tok-1", Duration::from_secs(60));
        assert_eq!(cache.get("appleMDMToken").as_deref(), Some("tok-1"));
        assert!(cache.get("androidMDMToken").is_none());
    }

    #[test]
    fn test_expired_entry_behaves_as_absent() {
        let cache = TokenCache::new();
        cache.set("k", "v", Duration::from_secs(0));
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite_replaces_value_and_ttl() {
        let cache = TokenCache::new();
        cache.set("k", "old", Duration::from_secs(0));
        cache.set("k", "new", Duration::from_secs(60));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn test_clone_shares_state() {
        let cache = TokenCache::new();
        let handle = cache.clone();
        handle.set("k", "v", Duration::from_secs(60));
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        cache.remove("k");
        assert!(handle.get("k").is_none());
    }
}
