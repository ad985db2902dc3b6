use crate::error::Error;
use crate::fetch::Fetch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

#[cfg(feature = "graphql")]
use async_graphql::SimpleObject;

/// Configuration for the request cache.
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// A disabled cache forwards every request straight to the fetcher.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Snapshot of cache activity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub keys: Vec<String>,
}

enum Entry {
    /// A fetch for this key is in flight; senders for every caller waiting
    /// on its outcome.
    Pending(Vec<oneshot::Sender<Result<Value, Error>>>),
    Resolved(Value),
}

/// Everything behind one lock, so a reset is atomic with respect to a
/// concurrent stats read.
#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
    hits: u64,
    misses: u64,
    /// Bumped by `clear` so an in-flight request from before a reset cannot
    /// install its result afterwards.
    generation: u64,
}

/// What a `get` call found under the lock.
enum Claim {
    Hit(Value),
    Wait(oneshot::Receiver<Result<Value, Error>>),
    Fetch(u64),
}

/// Deduplicating response cache keyed by request URL.
///
/// Each distinct key is fetched from the network at most once per cache
/// lifetime: concurrent callers of the same key share a single in-flight
/// request, later callers get the stored payload. Only successful responses
/// are kept, so a failed key is retried on its next `get`.
pub struct RequestCache {
    fetcher: Arc<dyn Fetch>,
    state: Mutex<CacheState>,
    config: CacheConfig,
}

impl RequestCache {
    pub fn new(fetcher: Arc<dyn Fetch>) -> Self {
        Self::with_config(fetcher, CacheConfig::default())
    }

    pub fn with_config(fetcher: Arc<dyn Fetch>, config: CacheConfig) -> Self {
        Self {
            fetcher,
            state: Mutex::new(CacheState::default()),
            config,
        }
    }

    /// Payload for `key`, fetching it if this is the first request.
    ///
    /// Callers arriving while the first fetch is still in flight wait for
    /// that fetch instead of issuing their own, and observe the same
    /// outcome, value or error.
    pub async fn get(&self, key: &str) -> Result<Value, Error> {
        if key.is_empty() {
            return Err(Error::empty_key());
        }
        if !self.config.enabled {
            return self.fetch_value(key).await;
        }

        let claim = {
            let mut guard = self.lock_state();
            let state = &mut *guard;
            match state.entries.get_mut(key) {
                Some(Entry::Resolved(value)) => {
                    state.hits += 1;
                    log::debug!(
                        "Cache hit for {} ({} hits, {} misses)",
                        key,
                        state.hits,
                        state.misses
                    );
                    Claim::Hit(value.clone())
                }
                Some(Entry::Pending(waiters)) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    log::debug!("Request already in flight for {}, waiting", key);
                    Claim::Wait(receiver)
                }
                None => {
                    state.misses += 1;
                    state
                        .entries
                        .insert(key.to_string(), Entry::Pending(Vec::new()));
                    log::debug!(
                        "Cache miss for {}, fetching ({} hits, {} misses)",
                        key,
                        state.hits,
                        state.misses
                    );
                    Claim::Fetch(state.generation)
                }
            }
        };

        match claim {
            Claim::Hit(value) => Ok(value),
            Claim::Wait(receiver) => match receiver.await {
                Ok(outcome) => outcome,
                // Sender dropped without an outcome: the entry was removed
                // by a reset while we waited.
                Err(_) => Err(Error::interrupted(key)),
            },
            Claim::Fetch(generation) => {
                let outcome = self.fetch_value(key).await;
                self.settle(key, generation, outcome)
            }
        }
    }

    /// Whether `key` has an entry, in flight or resolved. Does not touch
    /// the hit/miss counters.
    pub fn has(&self, key: &str) -> bool {
        self.lock_state().entries.contains_key(key)
    }

    /// Current statistics. In-flight entries occupy the map but are not
    /// reported in `size`/`keys` until their value lands.
    pub fn stats(&self) -> CacheStats {
        let guard = self.lock_state();
        let mut keys: Vec<String> = guard
            .entries
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Resolved(_)))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();

        CacheStats {
            hits: guard.hits,
            misses: guard.misses,
            size: keys.len(),
            keys,
        }
    }

    /// Remove every entry and zero both counters. Returns the number of
    /// removed entries. Callers still waiting on an in-flight entry are
    /// interrupted.
    pub fn clear(&self) -> usize {
        let mut guard = self.lock_state();
        let removed = guard.entries.len();
        // Dropping pending entries closes their waiter channels.
        guard.entries.clear();
        guard.hits = 0;
        guard.misses = 0;
        guard.generation = guard.generation.wrapping_add(1);
        log::info!("Cache cleared, removed {} entries", removed);
        removed
    }

    /// Fetch, require a 2xx status, decode.
    async fn fetch_value(&self, key: &str) -> Result<Value, Error> {
        let response = self.fetcher.fetch(key).await?;
        if !response.is_success() {
            return Err(Error::status(key, response.status()));
        }
        response.decode().map_err(|source| Error::decode(key, source))
    }

    /// Install the leader's outcome and hand it to every waiter.
    ///
    /// Success replaces the pending entry with the resolved value; failure
    /// removes the entry entirely so the next `get` retries the network.
    fn settle(
        &self,
        key: &str,
        generation: u64,
        outcome: Result<Value, Error>,
    ) -> Result<Value, Error> {
        let mut guard = self.lock_state();
        let state = &mut *guard;
        if state.generation != generation {
            // The cache was reset while this request was in flight; its
            // result must not repopulate the fresh map.
            return outcome;
        }

        if let Some(Entry::Pending(waiters)) = state.entries.remove(key) {
            match &outcome {
                Ok(value) => {
                    state
                        .entries
                        .insert(key.to_string(), Entry::Resolved(value.clone()));
                    log::debug!("Stored response for {}", key);
                    for waiter in waiters {
                        let _ = waiter.send(Ok(value.clone()));
                    }
                }
                Err(error) => {
                    log::warn!("Request for {} failed: {}", key, error);
                    for waiter in waiters {
                        let _ = waiter.send(Err(error.clone()));
                    }
                }
            }
        }

        outcome
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Thread-safe handle shared between collaborators.
pub type SharedRequestCache = Arc<RequestCache>;
