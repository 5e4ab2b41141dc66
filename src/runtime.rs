/// A trait for spawning a detached unit of work.
///
/// The refresh-ahead strategy hands its background reloads to a
/// `TaskSpawner`. The closure carries everything it needs; nothing is
/// reported back to the spawning call.
pub trait TaskSpawner: Send + Sync + 'static {
  /// Spawns a type-erased closure.
  fn spawn(&self, task: Box<dyn FnOnce() + Send>);
}

/// The default spawner: one OS thread per task.
///
/// Refreshes are expected to be rare (one per observed expiry), so a plain
/// `std::thread::spawn` is adequate. Workloads with heavy expiry churn can
/// supply a pooled spawner instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl TaskSpawner for ThreadSpawner {
  fn spawn(&self, task: Box<dyn FnOnce() + Send>) {
    std::thread::spawn(task);
  }
}

/// A spawner that runs refresh tasks as blocking tasks on a Tokio runtime.
#[cfg(feature = "tokio")]
pub struct TokioSpawner(tokio::runtime::Handle);

#[cfg(feature = "tokio")]
impl TokioSpawner {
  /// Creates a spawner that uses the current Tokio runtime context.
  /// Panics if called outside of a Tokio runtime.
  pub fn new() -> Self {
    Self(tokio::runtime::Handle::current())
  }
}

#[cfg(feature = "tokio")]
impl Default for TokioSpawner {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(feature = "tokio")]
impl TaskSpawner for TokioSpawner {
  fn spawn(&self, task: Box<dyn FnOnce() + Send>) {
    // Loaders are allowed to block, so they belong on the blocking pool.
    self.0.spawn_blocking(task);
  }
}
