use crate::builder::CacheMode;
use crate::shared::CacheShared;

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// A thread-safe loading cache.
///
/// Built by [`CacheBuilder`](crate::CacheBuilder). The handle is cheap to
/// clone; every clone shares one entry store, one clock, and one loader.
///
/// How [`get`](Cache::get) treats an expired entry depends on the
/// [`CacheMode`] fixed at construction:
///
/// - `Blocking` reloads synchronously, so callers never see stale data but
///   pay the loader's latency on every expiry.
/// - `RefreshAhead` returns the stale value immediately and reloads on a
///   detached background task, so callers never block on expiry but may
///   see data one expiry interval old.
pub struct Cache<K, V, H = ahash::RandomState> {
  pub(crate) shared: Arc<CacheShared<K, V, H>>,
}

impl<K, V, H> Clone for Cache<K, V, H> {
  fn clone(&self) -> Self {
    Self {
      shared: self.shared.clone(),
    }
  }
}

impl<K, V, H> fmt::Debug for Cache<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cache")
      .field("mode", &self.shared.mode)
      .field("max_size", &self.shared.max_size)
      .field("time_to_live", &self.shared.time_to_live)
      .finish_non_exhaustive()
  }
}

impl<K, V, H> Cache<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Send + Sync + 'static,
{
  /// Returns the value for `key`, loading it if absent or expired.
  ///
  /// Returns `None` only when this call required a load and the loader
  /// failed; prior cache state is left untouched in that case, so a later
  /// call can retry. A pure hit (including a stale hit in refresh-ahead
  /// mode) always succeeds.
  pub fn get(&self, key: &K) -> Option<Arc<V>> {
    match self.shared.mode {
      CacheMode::Blocking => self.get_blocking(key),
      CacheMode::RefreshAhead => self.get_refresh_ahead(key),
    }
  }

  /// Inserts a value, evicting the least-recently-accessed entries first
  /// if the cache is at its maximum size.
  ///
  /// Returns `true` if the key was new, `false` if an existing entry was
  /// updated in place.
  pub fn insert(&self, key: K, value: V) -> bool {
    self.shared.insert_with_eviction(key, Arc::new(value))
  }

  /// Removes `key`, firing the remove hook.
  ///
  /// Returns whether the key was present; removing an absent key is a
  /// valid no-op, not an error.
  pub fn remove(&self, key: &K) -> bool {
    self.shared.hooks.remove(key);
    self.shared.store.remove(key)
  }

  /// The current number of entries.
  pub fn len(&self) -> usize {
    self.shared.store.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether `key` is currently stored, expired or not. Does not advance
  /// access recency and never invokes the loader.
  pub fn contains_key(&self, key: &K) -> bool {
    self.shared.store.contains_key(key)
  }

  fn get_blocking(&self, key: &K) -> Option<Arc<V>> {
    let shared = &self.shared;
    match shared.store.get(key) {
      Some(value) if !shared.store.is_expired(key, shared.time_to_live) => {
        shared.hooks.hit(key);
        Some(value)
      }
      // Absent, or present but stale: reload before answering.
      _ => self.load_and_store(key),
    }
  }

  fn get_refresh_ahead(&self, key: &K) -> Option<Arc<V>> {
    let shared = &self.shared;
    let Some(value) = shared.store.get(key) else {
      // First population has no stale value to serve, so it blocks
      // exactly like the blocking strategy.
      return self.load_and_store(key);
    };

    if shared.store.is_expired(key, shared.time_to_live) {
      shared.hooks.miss(key);
      self.spawn_refresh(key.clone());
    } else {
      shared.hooks.hit(key);
    }
    // The caller gets the current value either way; it never waits on the
    // refresh task or observes its outcome.
    Some(value)
  }

  /// The shared synchronous miss path: fire the miss hook, run the loader
  /// on the calling thread, and write the result back on success.
  ///
  /// A failed load mutates nothing. Whatever entry triggered the reload
  /// (stale or none) stays as it was, and the caller is told the value was
  /// unavailable this call.
  fn load_and_store(&self, key: &K) -> Option<Arc<V>> {
    let shared = &self.shared;
    shared.hooks.miss(key);
    match shared.load_value(key) {
      Ok(value) => {
        shared.insert_with_eviction(key.clone(), value.clone());
        Some(value)
      }
      Err(_) => {
        shared.hooks.load_failure(key);
        None
      }
    }
  }

  /// Hands one background reload to the spawner. Fire-and-forget: the only
  /// observable effects are the eventual store write and hook calls.
  fn spawn_refresh(&self, key: K) {
    let shared = Arc::clone(&self.shared);
    self.shared.spawner.spawn(Box::new(move || {
      match shared.load_value(&key) {
        Ok(value) => {
          shared.insert_with_eviction(key, value);
        }
        Err(_) => shared.hooks.load_failure(&key),
      }
    }));
  }
}
