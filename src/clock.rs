use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A source of the current instant.
///
/// Every timestamp the cache records (insert, last access, last update)
/// comes from one `Clock`, so substituting an implementation gives full
/// control over expiration and eviction ordering in tests.
pub trait Clock: Send + Sync {
  fn now(&self) -> Instant;
}

/// The default `Clock`, backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  #[inline]
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// A `Clock` that only moves when told to.
///
/// Intended for tests: build the cache with a `ManualClock`, then `advance`
/// it past the TTL to trigger expiry without sleeping.
#[derive(Debug)]
pub struct ManualClock {
  now: Mutex<Instant>,
}

impl ManualClock {
  /// Creates a clock frozen at the current instant.
  pub fn new() -> Self {
    Self {
      now: Mutex::new(Instant::now()),
    }
  }

  /// Moves the clock forward by `duration`.
  pub fn advance(&self, duration: Duration) {
    *self.now.lock() += duration;
  }
}

impl Default for ManualClock {
  fn default() -> Self {
    Self::new()
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Instant {
    *self.now.lock()
  }
}
