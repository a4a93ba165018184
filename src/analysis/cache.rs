use log::trace;
use lru::LruCache;
use std::num::NonZeroUsize;

use crate::types::CacheKey;

const DEFAULT_CAPACITY: usize = 16;

/// Manages caching of derived results, evicting the least recently used
pub struct CacheManager<V> {
    cache: LruCache<CacheKey, V>,
}

impl<V> CacheManager<V> {
    /// Create a new cache manager
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Store a result in the cache
    pub fn store(&mut self, key: CacheKey, result: V) {
        self.cache.put(key, result);
    }

    /// Retrieve a result from the cache
    pub fn get(&mut self, key: &CacheKey) -> Option<&V> {
        let hit = self.cache.get(key);
        trace!("Cache {} for {:?}", if hit.is_some() { "hit" } else { "miss" }, key);
        hit
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<V> Default for CacheManager<V> {
    fn default() -> Self {
        Self::new()
    }
}
