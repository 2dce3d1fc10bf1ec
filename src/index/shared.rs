//! Thread-safe handle around a [`TrigramIndex`].
//!
//! Writes take an exclusive lock, so document ids stay sequential under
//! concurrent `add` calls. Queries share a read lock and never block each
//! other.

use crate::error::Result;
use crate::index::store::TrigramIndex;
use crate::index::types::{DocId, IndexConfig, IndexStats};
use std::sync::{Arc, RwLock};

/// Cloneable single-writer/multi-reader index handle
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    inner: Arc<RwLock<TrigramIndex>>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self::from_index(TrigramIndex::with_config(config))
    }

    pub fn from_index(index: TrigramIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn add(&self, content: &[u8]) -> DocId {
        self.inner.write().unwrap().add(content)
    }

    pub fn query(&self, text: &[u8]) -> Result<Vec<DocId>> {
        self.inner.read().unwrap().query(text)
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().unwrap().stats()
    }

    /// Run a closure with read access to the underlying index
    pub fn read<R>(&self, f: impl FnOnce(&TrigramIndex) -> R) -> R {
        f(&self.inner.read().unwrap())
    }
}
