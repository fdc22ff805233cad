//! Bounded memoization for parsed preference lists.
//!
//! Clients repeat the same Accept-family strings on nearly every
//! request, so parsing each occurrence is wasted work. The cache keys
//! parses by the exact header text and shares results as `Arc`s; an LRU
//! bound keeps an attacker who varies headers from growing it without
//! limit.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use tracing::trace;

use super::{PreferenceList, parse_preferences};

/// A thread-safe, LRU-bounded cache of parsed preference lists.
///
/// Lookups for a cached header return a clone of the stored `Arc`, so
/// concurrent readers share one allocation. Two threads racing on a
/// novel header may both parse it; both results are equal and the later
/// insert simply wins.
///
/// # Examples
///
/// ```
/// use httpv::PreferenceCache;
///
/// let cache = PreferenceCache::default();
/// let first = cache.parse("gzip, br;q=0.8");
/// let second = cache.parse("gzip, br;q=0.8");
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// ```
pub struct PreferenceCache {
    entries: Mutex<LruCache<String, Arc<PreferenceList>>>,
}

impl PreferenceCache {
    /// Capacity used by [`PreferenceCache::default`].
    pub const DEFAULT_CAPACITY: usize = 512;

    /// Creates a cache holding at most `capacity` distinct header
    /// strings. A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Parses `header`, reusing a previous parse of the same text when
    /// one is cached.
    pub fn parse(&self, header: &str) -> Arc<PreferenceList> {
        {
            let mut entries = self.lock();
            if let Some(hit) = entries.get(header) {
                trace!(header_len = header.len(), "preference cache hit");
                return Arc::clone(hit);
            }
        }

        // Parse outside the lock; a racing thread doing the same work
        // produces an identical value.
        let parsed = Arc::new(parse_preferences(header));
        trace!(
            header_len = header.len(),
            entries = parsed.len(),
            "preference cache miss"
        );
        self.lock().put(header.to_owned(), Arc::clone(&parsed));
        parsed
    }

    /// Number of header strings currently cached.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<PreferenceList>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // A panic mid-read cannot leave the map half-written, so a
            // poisoned lock is still usable.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for PreferenceCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for PreferenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.lock();
        f.debug_struct("PreferenceCache")
            .field("len", &entries.len())
            .field("capacity", &entries.cap().get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_share_the_same_allocation() {
        let cache = PreferenceCache::new(8);
        let first = cache.parse("text/html;q=0.9, application/json");
        let second = cache.parse("text/html;q=0.9, application/json");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cached_results_match_direct_parses() {
        let cache = PreferenceCache::default();
        let header = "en-US,en;q=0.9,fr;q=0.8";
        assert_eq!(*cache.parse(header), parse_preferences(header));
        assert_eq!(*cache.parse(header), parse_preferences(header));
    }

    #[test]
    fn distinct_headers_get_distinct_entries() {
        let cache = PreferenceCache::new(8);
        let html = cache.parse("text/html");
        let json = cache.parse("application/json");
        assert!(!Arc::ptr_eq(&html, &json));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_bounds_the_cache() {
        let cache = PreferenceCache::new(2);
        let first = cache.parse("a");
        cache.parse("b");
        cache.parse("c");
        assert_eq!(cache.len(), 2);

        // "a" was evicted; parsing it again builds a fresh value.
        let again = cache.parse("a");
        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(*first, *again);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let cache = PreferenceCache::new(0);
        cache.parse("a");
        cache.parse("b");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn values_survive_releasing_the_cache() {
        let prefs = {
            let cache = PreferenceCache::new(4);
            cache.parse("gzip, br;q=0.5")
        };
        assert_eq!(prefs.best().map(|(token, _)| token), Some("gzip"));
    }
}
