//! LRU cache of spell-check decisions.
//!
//! Entries carry the locale they were computed for; the session decides on
//! read whether a suggestion list is still usable.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

use super::Decision;
use crate::locale::LocaleSpec;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    pub decision: Decision,
    /// Session locale when the decision was made; `None` before any locale was
    /// resolved.
    pub locale: Option<LocaleSpec>,
}

#[derive(Debug)]
struct CacheInner {
    entries: LruCache<String, CachedResult>,
    hits: usize,
    misses: usize,
}

/// Shared between a session and the content-change subscription that clears it.
#[derive(Debug)]
pub struct SuggestionCache {
    inner: Mutex<CacheInner>,
}

impl SuggestionCache {
    /// A zero capacity falls back to the default of 50 entries.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            inner: Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    /// Look up `key`, refreshing its recency.
    pub fn get(&self, key: &str) -> Option<CachedResult> {
        let mut inner = self.inner.lock();
        let found = inner.entries.get(key).cloned();
        match found {
            Some(found) => {
                inner.hits += 1;
                Some(found)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, key: String, result: CachedResult) {
        self.inner.lock().entries.put(key, result);
    }

    /// Drop every entry. Statistics survive so invalidations show up as misses.
    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn reset_stats(&self) {
        let mut inner = self.inner.lock();
        inner.hits = 0;
        inner.misses = 0;
    }

    /// Returns (hits, misses).
    pub fn stats(&self) -> (usize, usize) {
        let inner = self.inner.lock();
        (inner.hits, inner.misses)
    }

    /// Hit rate as a percentage (0.0 to 100.0); `None` before any lookup.
    pub fn hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some((hits as f32 / total as f32) * 100.0)
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().entries.cap().get()
    }
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}
