//! TTL Result Cache
//!
//! Explicit key → value cache with a fixed time-to-live. An expired entry is
//! dropped when its key is read, and every insert sweeps out all expired
//! entries, so the map never holds more than one TTL's worth of keys.
//! Callers own invalidation; nothing is global.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use tracing::debug;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// In-memory cache whose entries expire after `ttl`
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Fresh value for `key`, if any
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(self.ttl) => {
                    debug!(?key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock: another caller may have refreshed it.
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|entry| entry.is_expired(self.ttl)) {
                entries.remove(key);
            }
        }
        None
    }

    /// Store `value`, sweeping out every expired entry first
    pub fn insert(&self, key: K, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            Self::sweep(&mut entries, self.ttl);
            entries.insert(
                key,
                CacheEntry {
                    value,
                    inserted_at: Instant::now(),
                },
            );
        }
    }

    /// Remove one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries
            .write()
            .map(|mut entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    fn sweep(entries: &mut HashMap<K, CacheEntry<V>>, ttl: Duration) {
        entries.retain(|key, entry| {
            let keep = !entry.is_expired(ttl);
            if !keep {
                debug!(?key, "Purged expired cache entry");
            }
            keep
        });
    }

    /// Number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_ttl() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("btc".into(), 1);
        assert_eq!(cache.get(&"btc".to_string()), Some(1));
        assert_eq!(cache.get(&"eth".to_string()), None);
    }

    #[test]
    fn test_entries_expire() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(20));
        cache.insert("btc", 1);
        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get(&"btc"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::ZERO);
        cache.insert("btc", 1);
        assert_eq!(cache.get(&"btc"), None);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("btc", 1);
        cache.insert("eth", 2);

        assert!(cache.invalidate(&"btc"));
        assert!(!cache.invalidate(&"btc"));
        assert_eq!(cache.get(&"eth"), Some(2));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_sweep_keeps_fresh() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(30));
        cache.insert("old", 1);
        std::thread::sleep(Duration::from_millis(50));
        cache.insert("new", 2);
        cache.insert("newer", 3);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"new"), Some(2));
    }

    #[test]
    fn test_insert_sweeps_unread_expired_keys() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_millis(5));
        for i in 0..1000 {
            cache.insert(format!("TICKER{i}"), i);
        }

        std::thread::sleep(Duration::from_millis(30));
        cache.insert("BTC".into(), 1);

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_read_keeps_refreshed_entry() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(20));
        cache.insert("btc", 1);
        std::thread::sleep(Duration::from_millis(40));
        cache.insert("btc", 2);

        assert_eq!(cache.get(&"btc"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
