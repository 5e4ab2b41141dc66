// Not every test binary uses every helper.
#![allow(dead_code)]

use loadstone::{Cache, CacheBuilder, CacheMode, ManualClock, TaskSpawner};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A spawner that runs refresh tasks inline on the calling thread, making
/// refresh-ahead behavior fully deterministic in tests.
pub struct InlineSpawner;

impl TaskSpawner for InlineSpawner {
  fn spawn(&self, task: Box<dyn FnOnce() + Send>) {
    task();
  }
}

/// A loader that counts its invocations and returns a value derived from
/// the call number, so tests can tell reloads apart.
pub fn versioned_loader(
  counter: Arc<AtomicUsize>,
) -> impl Fn(i32) -> Result<String, loadstone::LoadError> + Send + Sync + 'static {
  move |key: i32| {
    let version = counter.fetch_add(1, Ordering::SeqCst) + 1;
    Ok(format!("{}-v{}", key, version))
  }
}

/// Builds a blocking cache on a manual clock with a versioned loader.
pub fn build_blocking_cache(
  ttl: Duration,
  clock: Arc<ManualClock>,
  load_count: Arc<AtomicUsize>,
) -> Cache<i32, String> {
  CacheBuilder::default()
    .time_to_live(ttl)
    .clock(clock)
    .loader(versioned_loader(load_count))
    .build()
    .unwrap()
}

/// Builds a refresh-ahead cache on a manual clock with an inline spawner,
/// so background refreshes complete before `get` returns to the test.
pub fn build_refresh_cache(
  ttl: Duration,
  clock: Arc<ManualClock>,
  load_count: Arc<AtomicUsize>,
) -> Cache<i32, String> {
  CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(ttl)
    .clock(clock)
    .spawner(Arc::new(InlineSpawner))
    .loader(versioned_loader(load_count))
    .build()
    .unwrap()
}
