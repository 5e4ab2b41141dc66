use std::sync::Arc;
use std::time::Duration;

pub(crate) type EventHook<K> = Arc<dyn Fn(&K) + Send + Sync>;
pub(crate) type DurationHook<K> = Arc<dyn Fn(&K, Duration) + Send + Sync>;

/// The optional observability callbacks a cache can carry.
///
/// Every field may be absent; the fire helpers check presence so call sites
/// stay one-liners. Hooks run synchronously on whichever thread triggered
/// the event (including background refresh threads), so they must not block
/// for long.
pub(crate) struct Hooks<K> {
  pub(crate) on_miss: Option<EventHook<K>>,
  pub(crate) on_hit: Option<EventHook<K>>,
  pub(crate) on_load_failure: Option<EventHook<K>>,
  pub(crate) on_load_duration: Option<DurationHook<K>>,
  pub(crate) on_remove: Option<EventHook<K>>,
}

impl<K> Default for Hooks<K> {
  fn default() -> Self {
    Self {
      on_miss: None,
      on_hit: None,
      on_load_failure: None,
      on_load_duration: None,
      on_remove: None,
    }
  }
}

impl<K> Hooks<K> {
  #[inline]
  pub(crate) fn miss(&self, key: &K) {
    if let Some(hook) = &self.on_miss {
      hook(key);
    }
  }

  #[inline]
  pub(crate) fn hit(&self, key: &K) {
    if let Some(hook) = &self.on_hit {
      hook(key);
    }
  }

  #[inline]
  pub(crate) fn load_failure(&self, key: &K) {
    if let Some(hook) = &self.on_load_failure {
      hook(key);
    }
  }

  #[inline]
  pub(crate) fn load_duration(&self, key: &K, elapsed: Duration) {
    if let Some(hook) = &self.on_load_duration {
      hook(key, elapsed);
    }
  }

  #[inline]
  pub(crate) fn remove(&self, key: &K) {
    if let Some(hook) = &self.on_remove {
      hook(key);
    }
  }
}
