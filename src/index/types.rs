use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};

/// Unique identifier for a document in the index (assigned from 1)
pub type DocId = u64;

/// A trigram is a 3-byte sequence stored as u32 (only lower 24 bits used)
pub type Trigram = u32;

/// Configuration for the index and the loaders that feed it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Documents at least this long dedup trigrams with a bitset instead of sort+dedup
    pub bitset_threshold: usize,
    /// Batches at least this large are processed with rayon
    pub parallel_threshold: usize,
    /// Files larger than this are skipped by the corpus loader
    pub max_document_size: u64,
    /// Skip files that look binary when loading a corpus
    pub skip_binary: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            bitset_threshold: 1024,
            parallel_threshold: 64,
            max_document_size: 100 * 1024 * 1024,
            skip_binary: true,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bitset_threshold == 0 {
            return Err(IndexError::Config(
                "bitset_threshold must be positive".to_string(),
            ));
        }
        if self.parallel_threshold == 0 {
            return Err(IndexError::Config(
                "parallel_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of an index's contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of documents added (equals the last assigned id)
    pub doc_count: u64,
    /// Distinct trigrams with a posting list
    pub trigram_count: usize,
    /// Sum of all posting list lengths
    pub posting_count: u64,
    /// Documents shorter than 3 bytes, which no query can match
    pub unsearchable_docs: u64,
    /// Length of the largest posting list
    pub max_posting_len: u64,
}

/// Convert 3 bytes to a trigram
#[inline]
pub fn bytes_to_trigram(b0: u8, b1: u8, b2: u8) -> Trigram {
    ((b0 as u32) << 16) | ((b1 as u32) << 8) | (b2 as u32)
}

/// Convert trigram back to bytes
#[inline]
pub fn trigram_to_bytes(t: Trigram) -> [u8; 3] {
    [
        ((t >> 16) & 0xFF) as u8,
        ((t >> 8) & 0xFF) as u8,
        (t & 0xFF) as u8,
    ]
}
