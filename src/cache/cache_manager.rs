use lru_cache::LruCache;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

/// Thread-safe LRU wrapper for hot lookups that would otherwise hit the
/// database on every request.
pub struct CacheManager<K, V>
where
    K: Eq + Hash,
{
    cache: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> CacheManager<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        let cache = Arc::new(Mutex::new(LruCache::new(capacity)));
        CacheManager { cache }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.lock().unwrap().get_mut(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        self.cache.lock().unwrap().insert(key, value);
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.lock().unwrap().remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let cache: CacheManager<i64, &str> = CacheManager::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some("b"));
        assert_eq!(cache.get(&3), Some("c"));
    }

    #[test]
    fn remove_clears_entry() {
        let cache: CacheManager<i64, &str> = CacheManager::new(8);
        cache.insert(7, "x");
        assert_eq!(cache.remove(&7), Some("x"));
        assert_eq!(cache.get(&7), None);
    }
}
