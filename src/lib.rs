//! # trindex - in-memory trigram index
//!
//! trindex breaks each added document into overlapping 3-byte sequences
//! (trigrams) and keeps an inverted index from trigram to the set of
//! documents containing it. A query returns every document that contains
//! all trigrams of the query string.
//!
//! ## Architecture
//!
//! - [`utils`] - Trigram extraction, config loading, progress display
//! - [`index`] - The posting store ([`TrigramIndex`]) and its thread-safe handle
//! - [`query`] - Candidate evaluation by posting list intersection
//! - [`output`] - Result formatting for the `trindex` binary
//!
//! ## Quick Start
//!
//! ```
//! use trindex::{IndexError, TrigramIndex};
//!
//! let mut index = TrigramIndex::new();
//! assert_eq!(index.add(b"abcdef"), 1);
//! assert_eq!(index.add(b"bcdefg"), 2);
//!
//! assert_eq!(index.query(b"bcd").unwrap(), vec![1, 2]);
//! assert!(index.query(b"xyz").unwrap().is_empty());
//! assert!(matches!(index.query(b"xy"), Err(IndexError::QueryTooShort { .. })));
//! ```
//!
//! ## Limitations
//!
//! Results are candidates. A document is returned when every trigram of
//! the query occurs somewhere in it, which does not guarantee the query
//! occurs as one contiguous substring. Documents shorter than 3 bytes get
//! an id but can never be matched. The index lives in memory only.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{IndexError, Result};
pub use index::{DocId, IndexConfig, IndexStats, SharedIndex, Trigram, TrigramIndex};
pub use query::QueryEvaluator;
