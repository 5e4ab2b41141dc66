use std::fmt;

/// The error type loaders may fail with.
///
/// The cache never inspects the error beyond reporting the failure through
/// the load-failure hook, so any boxed error works.
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when building a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
  /// The cache was configured with a maximum size of zero. A loading cache
  /// must be able to hold at least one entry.
  ZeroMaxSize,
  /// The eviction percent must be in `0..=100`.
  InvalidEvictionPercent(u32),
  /// No loader was configured. The loader is what turns a plain map into a
  /// loading cache, so it is mandatory.
  MissingLoader,
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::ZeroMaxSize => write!(f, "cache max size cannot be zero"),
      BuildError::InvalidEvictionPercent(percent) => {
        write!(f, "eviction percent must be within 0..=100, got {}", percent)
      }
      BuildError::MissingLoader => write!(f, "a loader function is required"),
    }
  }
}

impl std::error::Error for BuildError {}
