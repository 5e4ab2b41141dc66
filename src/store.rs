use crate::clock::Clock;
use crate::entry::CacheEntry;
use crate::sorted::SortedList;

use core::fmt;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// The mutex-protected entry table backing a cache.
///
/// One exclusive lock covers every operation, so the value and its
/// timestamps are always consistent to any thread that observes them.
/// Individual operations are linearizable; no lock is ever held across a
/// loader invocation.
pub(crate) struct EntryStore<K, V, H> {
  entries: Mutex<HashMap<K, CacheEntry<V>, H>>,
  clock: Arc<dyn Clock>,
}

impl<K, V, H> fmt::Debug for EntryStore<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EntryStore")
      .field("len", &self.entries.lock().len())
      .finish()
  }
}

impl<K, V, H> EntryStore<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub(crate) fn new(hasher: H, clock: Arc<dyn Clock>) -> Self {
    Self {
      entries: Mutex::new(HashMap::with_hasher(hasher)),
      clock,
    }
  }

  /// Fetches the value for `key`, advancing its `last_access` timestamp.
  ///
  /// This is the only place access recency moves; everything above the
  /// store reads through here.
  pub(crate) fn get(&self, key: &K) -> Option<Arc<V>> {
    let mut entries = self.entries.lock();
    let entry = entries.get_mut(key)?;
    entry.last_access = self.clock.now();
    Some(entry.value())
  }

  /// Inserts or overwrites the value for `key`.
  ///
  /// Returns `true` if the key was absent (a fresh entry with all three
  /// timestamps set to now), `false` if an existing entry was updated in
  /// place (only `last_update` advances).
  pub(crate) fn insert(&self, key: K, value: Arc<V>) -> bool {
    let now = self.clock.now();
    let mut entries = self.entries.lock();
    match entries.get_mut(&key) {
      Some(entry) => {
        entry.overwrite(value, now);
        false
      }
      None => {
        entries.insert(key, CacheEntry::new(value, now));
        true
      }
    }
  }

  /// Deletes `key`, reporting whether it was present.
  pub(crate) fn remove(&self, key: &K) -> bool {
    self.entries.lock().remove(key).is_some()
  }

  /// The current entry count.
  pub(crate) fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub(crate) fn contains_key(&self, key: &K) -> bool {
    self.entries.lock().contains_key(key)
  }

  /// Whether `key` has outlived `ttl` since its last update.
  ///
  /// An absent key is not expired; callers that care about presence must
  /// check it separately. A `None` or zero `ttl` never expires.
  pub(crate) fn is_expired(&self, key: &K, ttl: Option<Duration>) -> bool {
    let entries = self.entries.lock();
    match entries.get(key) {
      Some(entry) => entry.is_expired(ttl, self.clock.now()),
      None => false,
    }
  }

  /// Removes the `count` entries with the smallest `last_access`.
  ///
  /// The ordering is an ephemeral snapshot rebuilt here on every call: all
  /// entries are ranked on a `SortedList` keyed by access time, the first
  /// `count` are deleted. Ties fall back to the snapshot walk order, which
  /// is deterministic for a given map state. No-op when `count` is zero;
  /// removes everything when `count` exceeds the entry count.
  pub(crate) fn evict_least_recently_accessed(&self, count: usize) {
    if count == 0 {
      return;
    }

    let mut entries = self.entries.lock();

    let mut by_access: SortedList<(Instant, K), _> =
      SortedList::new(|a: &(Instant, K), b: &(Instant, K)| a.0.cmp(&b.0));
    for (key, entry) in entries.iter() {
      by_access.insert((entry.last_access, key.clone()));
    }

    let victims: Vec<K> = by_access.first_n(count).map(|(_, key)| key.clone()).collect();
    for key in &victims {
      entries.remove(key);
    }
  }
}
