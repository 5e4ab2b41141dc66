use loadstone::CacheBuilder;

use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct User {
  id: u64,
  name: String,
}

fn main() {
  let cache = CacheBuilder::default()
    .max_size(100)
    .time_to_live(Duration::from_secs(2))
    .eviction_percent(10)
    .on_miss(|id: &u64| println!("[hook] miss for user {}", id))
    .on_hit(|id: &u64| println!("[hook] hit for user {}", id))
    .on_load_duration(|id, elapsed| println!("[hook] loaded user {} in {:?}", id, elapsed))
    .loader(|id: u64| {
      // Stand-in for a database call.
      thread::sleep(Duration::from_millis(200));
      Ok(User {
        id,
        name: format!("user-{}", id),
      })
    })
    .build()
    .unwrap();

  println!("--- first get blocks on the loader ---");
  let user = cache.get(&1).unwrap();
  println!("got {:?}", user);

  println!("--- second get is a hit ---");
  let user = cache.get(&1).unwrap();
  println!("got {} (id {})", user.name, user.id);

  println!("--- after the TTL, the caller blocks on a reload ---");
  thread::sleep(Duration::from_secs(3));
  let user = cache.get(&1).unwrap();
  println!("got {:?} again, freshly loaded", user.name);
}
