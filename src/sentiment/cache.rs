// src/sentiment/cache.rs
// Bounded LRU cache for analysis results, keyed by exact review text

use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;

use super::types::SentimentResult;

/// Default entry ceiling
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

pub struct ResultCache {
    cache: Mutex<LruCache<String, SentimentResult>>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<SentimentResult> {
        let mut cache = self.cache.lock().await;
        cache.get(key).cloned()
    }

    pub async fn put(&self, key: &str, value: SentimentResult) {
        let mut cache = self.cache.lock().await;
        cache.put(key.to_string(), value);
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
