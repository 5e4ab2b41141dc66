//! A generic, thread-safe, in-process loading cache.
//!
//! Callers register a loader function that computes a value for an absent
//! key; the cache transparently loads, stores, expires, and evicts entries.
//!
//! # Features
//! - **Loading**: a caller-supplied, fallible loader is invoked on miss.
//! - **Two reload strategies**: `Blocking` always serves freshly loaded
//!   data (blocking the caller on expiry), `RefreshAhead` serves the stale
//!   value immediately and refreshes on a detached background task.
//! - **TTL expiration**: measured from last update, so a frequently-read
//!   but never-rewritten entry still expires. No TTL means entries never
//!   expire.
//! - **Bounded size**: once the cache reaches its maximum size, a
//!   configurable percentage of the least-recently-accessed entries is
//!   evicted before the next insertion.
//! - **Non-Clone support**: values are stored in an `Arc<V>`, avoiding
//!   `V: Clone` bounds.
//! - **Observability**: optional per-event hooks (miss, hit, load failure,
//!   load duration, remove) invoked synchronously.
//! - **Deterministic testing**: the clock and the background task spawner
//!   are both injectable.

// Public modules that form the API
pub mod builder;
pub mod cache;
pub mod clock;
pub mod error;
pub mod runtime;
pub mod sorted;

// Internal, crate-only modules
mod entry;
mod hooks;
mod loader;
mod shared;
mod store;

// Re-export the primary user-facing types for convenience
pub use builder::{CacheBuilder, CacheMode};
pub use cache::Cache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{BuildError, LoadError};
pub use runtime::{TaskSpawner, ThreadSpawner};
#[cfg(feature = "tokio")]
pub use runtime::TokioSpawner;
pub use sorted::SortedList;
