//! Per-process memo of transform results.
//!
//! The cache is an ordinary value owned by whoever owns the dispatcher; there
//! is no global state. Entries live until [`TransformCache::clear`] or until
//! the cache is dropped. Values are `Arc<str>` so a hit hands back the very
//! same allocation the first call produced.

use crate::transform::TransformMode;
use std::collections::HashMap;
use std::sync::Arc;

/// A transform request: the mode (target language included) and the exact
/// input text. No normalisation; `"a"` and `"a "` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub mode: TransformMode,
    pub text: String,
}

impl CacheKey {
    pub fn new(mode: &TransformMode, text: &str) -> Self {
        Self {
            mode: *mode,
            text: text.to_string(),
        }
    }
}

/// Unbounded map from request to result.
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: HashMap<CacheKey, Arc<str>>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, mode: &TransformMode, text: &str) -> Option<Arc<str>> {
        self.entries.get(&CacheKey::new(mode, text)).cloned()
    }

    /// Store `value` and return the shared handle now held by the cache.
    pub fn insert(&mut self, mode: &TransformMode, text: &str, value: String) -> Arc<str> {
        let value: Arc<str> = Arc::from(value);
        self.entries
            .insert(CacheKey::new(mode, text), Arc::clone(&value));
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
