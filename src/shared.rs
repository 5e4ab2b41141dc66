use crate::builder::CacheMode;
use crate::clock::Clock;
use crate::error::LoadError;
use crate::hooks::Hooks;
use crate::loader::Loader;
use crate::runtime::TaskSpawner;
use crate::store::EntryStore;

use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

/// The state shared between every clone of a `Cache` handle and every
/// background refresh task: one entry store, one clock, and the immutable
/// configuration resolved by the builder.
pub(crate) struct CacheShared<K, V, H> {
  pub(crate) store: EntryStore<K, V, H>,
  pub(crate) mode: CacheMode,
  pub(crate) max_size: usize,
  pub(crate) eviction_percent: u32,
  pub(crate) time_to_live: Option<Duration>,
  pub(crate) loader: Loader<K, V>,
  pub(crate) hooks: Hooks<K>,
  pub(crate) clock: Arc<dyn Clock>,
  pub(crate) spawner: Arc<dyn TaskSpawner>,
}

impl<K, V, H> CacheShared<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  /// How many entries one eviction pass removes once the cache is full.
  #[inline]
  pub(crate) fn eviction_count(&self) -> usize {
    self.max_size.saturating_mul(self.eviction_percent as usize) / 100
  }

  /// Invokes the loader for `key`, reporting the elapsed time through the
  /// load-duration hook whether the load succeeds or fails.
  ///
  /// Runs on the calling thread; the store's lock is never held here.
  pub(crate) fn load_value(&self, key: &K) -> Result<Arc<V>, LoadError> {
    let start = self.clock.now();
    let result = (self.loader)(key.clone());
    let elapsed = self.clock.now().saturating_duration_since(start);
    self.hooks.load_duration(key, elapsed);
    result.map(Arc::new)
  }

  /// Writes `value` through the store, evicting first if the cache is at
  /// its maximum size.
  ///
  /// Eviction happens before the insertion so the incoming entry can never
  /// be selected as its own victim. The size check and the insertion are
  /// two separate store operations; concurrent writers near the bound may
  /// overshoot transiently, which is accepted soft-bound behavior.
  pub(crate) fn insert_with_eviction(&self, key: K, value: Arc<V>) -> bool {
    if self.store.len() >= self.max_size {
      self.store.evict_least_recently_accessed(self.eviction_count());
    }
    self.store.insert(key, value)
  }
}
