use crate::cache::Cache;
use crate::clock::{Clock, SystemClock};
use crate::error::{BuildError, LoadError};
use crate::hooks::Hooks;
use crate::loader::Loader;
use crate::runtime::{TaskSpawner, ThreadSpawner};
use crate::shared::CacheShared;
use crate::store::EntryStore;

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_MAX_SIZE: usize = 10;
const DEFAULT_EVICTION_PERCENT: u32 = 10;

/// How the cache handles an entry that is present but expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
  /// Block the caller until the value is reloaded. Callers never see stale
  /// data, at the cost of tail latency on every expiry.
  #[default]
  Blocking,
  /// Return the stale value immediately and reload on a detached
  /// background task. Callers never block on expiry, at the cost of
  /// serving data up to one expiry interval old.
  RefreshAhead,
}

/// A builder for [`Cache`] instances.
///
/// The numeric knobs are optional and resolve to defaults at build time:
/// a maximum size of 10 entries, an eviction pass of 10 percent, and no
/// expiration. The loader is mandatory.
///
/// ```
/// use loadstone::{CacheBuilder, CacheMode};
/// use std::time::Duration;
///
/// let cache = CacheBuilder::default()
///   .max_size(100)
///   .time_to_live(Duration::from_secs(30))
///   .mode(CacheMode::RefreshAhead)
///   .eviction_percent(10)
///   .loader(|key: String| Ok(key.len()))
///   .build()
///   .unwrap();
///
/// assert_eq!(*cache.get(&"four".to_string()).unwrap(), 4);
/// ```
pub struct CacheBuilder<K, V, H = ahash::RandomState> {
  max_size: Option<usize>,
  eviction_percent: Option<u32>,
  time_to_live: Option<Duration>,
  mode: CacheMode,
  hasher: H,
  loader: Option<Loader<K, V>>,
  hooks: Hooks<K>,
  clock: Option<Arc<dyn Clock>>,
  spawner: Option<Arc<dyn TaskSpawner>>,
}

impl<K, V, H> fmt::Debug for CacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("max_size", &self.max_size)
      .field("eviction_percent", &self.eviction_percent)
      .field("time_to_live", &self.time_to_live)
      .field("mode", &self.mode)
      .field("has_loader", &self.loader.is_some())
      .finish_non_exhaustive()
  }
}

impl<K, V, H: Default> CacheBuilder<K, V, H> {
  /// Creates a new `CacheBuilder` with default settings.
  pub fn new() -> Self {
    Self {
      max_size: None,
      eviction_percent: None,
      time_to_live: None,
      mode: CacheMode::default(),
      hasher: H::default(),
      loader: None,
      hooks: Hooks::default(),
      clock: None,
      spawner: None,
    }
  }
}

impl<K, V> Default for CacheBuilder<K, V, ahash::RandomState> {
  fn default() -> Self {
    Self::new()
  }
}

// --- General configuration methods ---
impl<K, V, H> CacheBuilder<K, V, H> {
  /// Sets the maximum number of entries the cache holds before an insert
  /// triggers eviction. Defaults to 10. Must be greater than zero.
  pub fn max_size(mut self, max_size: usize) -> Self {
    self.max_size = Some(max_size);
    self
  }

  /// Sets the percentage of `max_size` removed in one eviction pass once
  /// the cache is full. Defaults to 10. Must be within `0..=100`.
  pub fn eviction_percent(mut self, percent: u32) -> Self {
    self.eviction_percent = Some(percent);
    self
  }

  /// Sets how long an entry stays fresh after its last update. Without a
  /// TTL (or with a zero one) entries never expire.
  pub fn time_to_live(mut self, duration: Duration) -> Self {
    self.time_to_live = Some(duration);
    self
  }

  /// Selects the reload strategy. Defaults to [`CacheMode::Blocking`].
  /// Fixed once the cache is built.
  pub fn mode(mut self, mode: CacheMode) -> Self {
    self.mode = mode;
    self
  }

  /// Sets the loader the cache invokes for an absent or expired key.
  pub fn loader(mut self, f: impl Fn(K) -> Result<V, LoadError> + Send + Sync + 'static) -> Self {
    self.loader = Some(Arc::new(f));
    self
  }

  /// Sets the hasher for the entry map.
  pub fn hasher<H2>(self, hasher: H2) -> CacheBuilder<K, V, H2> {
    CacheBuilder {
      max_size: self.max_size,
      eviction_percent: self.eviction_percent,
      time_to_live: self.time_to_live,
      mode: self.mode,
      hasher,
      loader: self.loader,
      hooks: self.hooks,
      clock: self.clock,
      spawner: self.spawner,
    }
  }

  /// Substitutes the time source. Defaults to [`SystemClock`]; tests pass
  /// a [`ManualClock`](crate::ManualClock) for deterministic expiry.
  pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = Some(clock);
    self
  }

  /// Substitutes the spawner used for refresh-ahead background reloads.
  /// Defaults to [`ThreadSpawner`].
  pub fn spawner(mut self, spawner: Arc<dyn TaskSpawner>) -> Self {
    self.spawner = Some(spawner);
    self
  }

  // --- Hook registration ---

  /// Called when `get` finds no usable entry and must load.
  pub fn on_miss(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
    self.hooks.on_miss = Some(Arc::new(f));
    self
  }

  /// Called when `get` is answered from a fresh entry.
  pub fn on_hit(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
    self.hooks.on_hit = Some(Arc::new(f));
    self
  }

  /// Called when the loader returns an error, on either the blocking or
  /// the background refresh path.
  pub fn on_load_failure(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
    self.hooks.on_load_failure = Some(Arc::new(f));
    self
  }

  /// Called after every loader invocation with the elapsed wall time,
  /// whether the load succeeded or failed.
  pub fn on_load_duration(mut self, f: impl Fn(&K, Duration) + Send + Sync + 'static) -> Self {
    self.hooks.on_load_duration = Some(Arc::new(f));
    self
  }

  /// Called when an entry is explicitly removed.
  pub fn on_remove(mut self, f: impl Fn(&K) + Send + Sync + 'static) -> Self {
    self.hooks.on_remove = Some(Arc::new(f));
    self
  }
}

// --- Build ---
impl<K, V, H> CacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Send + Sync + 'static,
{
  /// Validates the configuration and builds the cache.
  pub fn build(self) -> Result<Cache<K, V, H>, BuildError> {
    let max_size = self.max_size.unwrap_or(DEFAULT_MAX_SIZE);
    if max_size == 0 {
      return Err(BuildError::ZeroMaxSize);
    }

    let eviction_percent = self.eviction_percent.unwrap_or(DEFAULT_EVICTION_PERCENT);
    if eviction_percent > 100 {
      return Err(BuildError::InvalidEvictionPercent(eviction_percent));
    }

    let loader = self.loader.ok_or(BuildError::MissingLoader)?;

    let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
    let spawner = self.spawner.unwrap_or_else(|| Arc::new(ThreadSpawner));

    let shared = CacheShared {
      store: EntryStore::new(self.hasher, clock.clone()),
      mode: self.mode,
      max_size,
      eviction_percent,
      time_to_live: self.time_to_live,
      loader,
      hooks: self.hooks,
      clock,
      spawner,
    };

    Ok(Cache {
      shared: Arc::new(shared),
    })
  }
}
