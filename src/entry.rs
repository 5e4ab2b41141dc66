use std::sync::Arc;
use std::time::{Duration, Instant};

/// A container for a value in the cache, holding all necessary metadata.
///
/// Keeping the timestamps next to the value in one map entry means the
/// value and its bookkeeping can never drift apart: both are created,
/// updated, and removed under the store's single lock.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
  /// The user's value, wrapped in an Arc for shared ownership.
  value: Arc<V>,
  /// When the key was first inserted. Expiry and eviction key off the
  /// other two timestamps.
  #[allow(dead_code)]
  pub(crate) inserted_at: Instant,
  /// When the value was last read through `get`.
  pub(crate) last_access: Instant,
  /// When the value was last written. Expiry is measured from here.
  pub(crate) last_update: Instant,
}

impl<V> CacheEntry<V> {
  /// Creates a fresh entry with all three timestamps set to `now`.
  pub(crate) fn new(value: Arc<V>, now: Instant) -> Self {
    Self {
      value,
      inserted_at: now,
      last_access: now,
      last_update: now,
    }
  }

  /// Returns a clone of the `Arc` containing the value.
  #[inline]
  pub(crate) fn value(&self) -> Arc<V> {
    self.value.clone()
  }

  /// Overwrites the value in place, advancing only `last_update`.
  /// `last_access` deliberately stays put: a write is not a read.
  pub(crate) fn overwrite(&mut self, value: Arc<V>, now: Instant) {
    self.value = value;
    self.last_update = now;
  }

  /// Whether the entry has outlived `ttl` since its last update.
  ///
  /// A `None` or zero `ttl` means the entry never expires, and so does a
  /// `ttl` large enough that the deadline is unrepresentable.
  #[inline]
  pub(crate) fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
    match ttl {
      Some(ttl) if !ttl.is_zero() => self
        .last_update
        .checked_add(ttl)
        .map_or(false, |deadline| now > deadline),
      _ => false,
    }
  }
}
