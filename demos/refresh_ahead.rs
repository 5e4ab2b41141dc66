use loadstone::{CacheBuilder, CacheMode};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() {
  let versions = Arc::new(AtomicUsize::new(0));

  let cache = CacheBuilder::default()
    .mode(CacheMode::RefreshAhead)
    .time_to_live(Duration::from_secs(1))
    .loader({
      let versions = versions.clone();
      move |key: String| {
        let version = versions.fetch_add(1, Ordering::SeqCst) + 1;
        // Stand-in for a slow upstream fetch.
        thread::sleep(Duration::from_millis(300));
        Ok(format!("{} (version {})", key, version))
      }
    })
    .build()
    .unwrap();

  let key = "report".to_string();

  println!("--- first population blocks ---");
  let started = Instant::now();
  println!("got '{}' in {:?}", cache.get(&key).unwrap(), started.elapsed());

  println!("--- wait for the TTL to lapse ---");
  thread::sleep(Duration::from_millis(1200));

  println!("--- expired read returns the stale value immediately ---");
  let started = Instant::now();
  let stale = cache.get(&key).unwrap();
  println!("got '{}' in {:?} (refresh running in the background)", stale, started.elapsed());

  thread::sleep(Duration::from_millis(500));
  println!("--- after the refresh lands, reads are fresh ---");
  println!("got '{}'", cache.get(&key).unwrap());
}
