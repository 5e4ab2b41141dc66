mod common;

use common::build_refresh_cache;
use loadstone::{CacheBuilder, CacheMode, ManualClock};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const TTL: Duration = Duration::from_millis(10);

#[test]
fn test_first_population_blocks_like_blocking_mode() {
  let clock = Arc::new(ManualClock::new());
  let load_count = Arc::new(AtomicUsize::new(0));
  let cache = build_refresh_cache(TTL, clock, load_count.clone());

  // There is no stale value to serve on first contact, so the load is
  // synchronous and the caller sees its result directly.
  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  assert_eq!(load_count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_stale_serve_then_background_refresh() {
  let clock = Arc::new(ManualClock::new());
  let load_count = Arc::new(AtomicUsize::new(0));
  let cache = build_refresh_cache(TTL, clock.clone(), load_count.clone());

  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  clock.advance(TTL + Duration::from_millis(1));

  // Expired: the call still succeeds immediately with the stale value,
  // and the refresh runs on the (inline) spawner.
  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  assert_eq!(load_count.load(Ordering::SeqCst), 2);

  // The refresh wrote v2 back, so the next read is fresh.
  assert_eq!(*cache.get(&1).unwrap(), "1-v2");
}

#[test]
fn test_background_failure_keeps_serving_stale() {
  let clock = Arc::new(ManualClock::new());
  let load_count = Arc::new(AtomicUsize::new(0));
  let failures = Arc::new(AtomicUsize::new(0));
  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(TTL)
    .clock(clock.clone())
    .spawner(Arc::new(common::InlineSpawner))
    .on_load_failure({
      let failures = failures.clone();
      move |_key: &i32| {
        failures.fetch_add(1, Ordering::SeqCst);
      }
    })
    .loader({
      let load_count = load_count.clone();
      move |key: i32| {
        if load_count.fetch_add(1, Ordering::SeqCst) == 0 {
          Ok(format!("{}-v1", key))
        } else {
          Err("backend down".into())
        }
      }
    })
    .build()
    .unwrap();

  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  clock.advance(TTL + Duration::from_millis(1));

  // Each expired read serves the stale value and triggers another failed
  // refresh; there is no retry scheduling beyond the next get.
  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  assert_eq!(failures.load(Ordering::SeqCst), 2);
  assert_eq!(load_count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_expired_read_fires_miss_not_hit() {
  let clock = Arc::new(ManualClock::new());
  let misses = Arc::new(AtomicUsize::new(0));
  let hits = Arc::new(AtomicUsize::new(0));
  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(TTL)
    .clock(clock.clone())
    .spawner(Arc::new(common::InlineSpawner))
    .on_miss({
      let misses = misses.clone();
      move |_key: &i32| {
        misses.fetch_add(1, Ordering::SeqCst);
      }
    })
    .on_hit({
      let hits = hits.clone();
      move |_key| {
        hits.fetch_add(1, Ordering::SeqCst);
      }
    })
    .loader(|key: i32| Ok(key * 10))
    .build()
    .unwrap();

  cache.get(&1); // first population: miss
  cache.get(&1); // fresh: hit
  clock.advance(TTL + Duration::from_millis(1));
  cache.get(&1); // stale serve: counts as a miss even though it succeeds

  assert_eq!(misses.load(Ordering::SeqCst), 2);
  assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_remove_fires_hook_and_deletes() {
  let removes = Arc::new(AtomicUsize::new(0));
  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .on_remove({
      let removes = removes.clone();
      move |_key: &i32| {
        removes.fetch_add(1, Ordering::SeqCst);
      }
    })
    .loader(|key: i32| Ok(key * 10))
    .build()
    .unwrap();

  cache.insert(1, 10);
  assert!(cache.remove(&1));
  assert!(!cache.remove(&1), "second remove finds nothing");
  assert!(!cache.contains_key(&1));
  assert_eq!(removes.load(Ordering::SeqCst), 2);
}

#[cfg(feature = "tokio")]
#[tokio::test(flavor = "multi_thread")]
async fn test_tokio_spawner_runs_refreshes() {
  use loadstone::TokioSpawner;

  let clock = Arc::new(ManualClock::new());
  let load_count = Arc::new(AtomicUsize::new(0));
  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(TTL)
    .clock(clock.clone())
    .spawner(Arc::new(TokioSpawner::default()))
    .loader(common::versioned_loader(load_count.clone()))
    .build()
    .unwrap();

  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  clock.advance(TTL + Duration::from_millis(1));
  assert_eq!(*cache.get(&1).unwrap(), "1-v1");

  // The refresh runs on the runtime's blocking pool; poll for the write.
  let deadline = Instant::now() + Duration::from_secs(5);
  while *cache.get(&1).unwrap() == "1-v1" {
    assert!(Instant::now() < deadline, "refresh never landed");
    tokio::time::sleep(Duration::from_millis(5)).await;
  }
}

#[test]
fn test_threaded_refresh_eventually_lands() {
  let clock = Arc::new(ManualClock::new());
  let load_count = Arc::new(AtomicUsize::new(0));
  // Default spawner: a real detached thread per refresh.
  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(TTL)
    .clock(clock.clone())
    .loader(common::versioned_loader(load_count.clone()))
    .build()
    .unwrap();

  assert_eq!(*cache.get(&1).unwrap(), "1-v1");
  clock.advance(TTL + Duration::from_millis(1));
  assert_eq!(
    *cache.get(&1).unwrap(),
    "1-v1",
    "expired read must serve the stale value without blocking"
  );

  // Wait for the detached refresh to write v2 back.
  let deadline = Instant::now() + Duration::from_secs(5);
  loop {
    // Polling an expired entry may trigger additional refreshes, so any
    // version newer than v1 counts as the refresh landing.
    if load_count.load(Ordering::SeqCst) >= 2 && *cache.get(&1).unwrap() != "1-v1" {
      break;
    }
    assert!(Instant::now() < deadline, "background refresh never landed");
    thread::sleep(Duration::from_millis(5));
  }
}
