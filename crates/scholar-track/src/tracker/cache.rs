use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Read-through cache keyed by query path; writers call `invalidate` once confirmed.
///
/// Every `invalidate` bumps the key's generation and `clear` bumps a cache-wide
/// epoch. A load only lands in the cache when neither moved while it ran.
#[derive(Debug)]
pub struct QueryCache<V> {
    state: Mutex<CacheState<V>>,
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, Arc<V>>,
    generations: HashMap<String, u64>,
    epoch: u64,
}

impl<V> CacheState<V> {
    fn stamp(&self, key: &str) -> (u64, u64) {
        let generation = self.generations.get(key).copied().unwrap_or(0);
        (self.epoch, generation)
    }
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                generations: HashMap::new(),
                epoch: 0,
            }),
        }
    }
}

impl<V> QueryCache<V> {
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.state().entries.get(key).cloned()
    }

    pub fn insert(&self, key: impl Into<String>, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.state().entries.insert(key.into(), value.clone());
        value
    }

    /// Returns the cached value or runs `loader`; failed loads are not cached, and
    /// neither are loads overtaken by an invalidation.
    pub async fn get_or_load<F, Fut, E>(&self, key: &str, loader: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let stamp = {
            let state = self.state();
            if let Some(hit) = state.entries.get(key) {
                return Ok(hit.clone());
            }
            state.stamp(key)
        };

        let loaded = Arc::new(loader().await?);

        let mut state = self.state();
        if state.stamp(key) == stamp {
            state.entries.insert(key.to_string(), loaded.clone());
        }
        Ok(loaded)
    }

    pub fn invalidate(&self, key: &str) -> bool {
        let mut state = self.state();
        *state.generations.entry(key.to_string()).or_insert(0) += 1;
        state.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        let mut state = self.state();
        state.epoch += 1;
        state.entries.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state().entries.contains_key(key)
    }

    fn state(&self) -> MutexGuard<'_, CacheState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
