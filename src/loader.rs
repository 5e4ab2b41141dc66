use crate::error::LoadError;

use std::sync::Arc;

/// The caller-supplied function that computes a value for a key.
///
/// Stored behind an `Arc` so the refresh-ahead strategy can hand a clone to
/// a detached background task. The loader runs outside the store's lock in
/// every code path; a slow load for one key never stalls readers of others.
pub(crate) type Loader<K, V> = Arc<dyn Fn(K) -> Result<V, LoadError> + Send + Sync>;
