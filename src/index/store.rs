use crate::index::types::*;
use crate::utils::unique_trigrams_with_threshold;
use ahash::AHashMap;
use rayon::prelude::*;
use roaring::RoaringTreemap;
use tracing::debug;

/// In-memory trigram index: trigram -> set of documents containing it.
///
/// `add` is the only mutator. Posting lists are handed out as shared
/// references, so readers can never modify them.
#[derive(Debug, Default, Clone)]
pub struct TrigramIndex {
    config: IndexConfig,
    postings: AHashMap<Trigram, RoaringTreemap>,
    /// Last assigned document id (0 while empty)
    max_doc_id: DocId,
    /// Documents too short to produce a trigram
    unsearchable_docs: u64,
}

impl TrigramIndex {
    /// Create an empty index with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Add a document and return its id.
    ///
    /// Ids are sequential from 1. A document shorter than 3 bytes still
    /// consumes an id but records no postings, so no query can match it.
    ///
    /// # Panics
    ///
    /// Panics once `DocId::MAX` documents have been added; ids are never
    /// wrapped or reused.
    pub fn add(&mut self, content: &[u8]) -> DocId {
        let trigrams = unique_trigrams_with_threshold(content, self.config.bitset_threshold);
        self.insert_document(&trigrams)
    }

    /// Add many documents, returning the ids assigned in input order.
    ///
    /// Trigram extraction runs in parallel for large batches; insertion is
    /// sequential so ids follow the order of `contents`.
    pub fn add_batch<T>(&mut self, contents: &[T]) -> Vec<DocId>
    where
        T: AsRef<[u8]> + Sync,
    {
        let threshold = self.config.bitset_threshold;
        let extracted: Vec<Vec<Trigram>> = if contents.len() >= self.config.parallel_threshold {
            contents
                .par_iter()
                .map(|c| unique_trigrams_with_threshold(c.as_ref(), threshold))
                .collect()
        } else {
            contents
                .iter()
                .map(|c| unique_trigrams_with_threshold(c.as_ref(), threshold))
                .collect()
        };

        extracted
            .iter()
            .map(|trigrams| self.insert_document(trigrams))
            .collect()
    }

    /// Record one document given its distinct trigrams
    fn insert_document(&mut self, trigrams: &[Trigram]) -> DocId {
        let doc_id = self
            .max_doc_id
            .checked_add(1)
            .expect("document id space exhausted");

        for &trigram in trigrams {
            self.postings.entry(trigram).or_default().insert(doc_id);
        }

        if trigrams.is_empty() {
            self.unsearchable_docs += 1;
            debug!(doc_id, "document has no trigrams and cannot be matched");
        } else {
            debug!(doc_id, trigrams = trigrams.len(), "indexed document");
        }

        self.max_doc_id = doc_id;
        doc_id
    }

    /// Read-only view of a trigram's posting list
    pub fn postings(&self, trigram: Trigram) -> Option<&RoaringTreemap> {
        self.postings.get(&trigram)
    }

    pub fn contains_trigram(&self, trigram: Trigram) -> bool {
        self.postings.contains_key(&trigram)
    }

    /// Number of documents added so far (also the last assigned id)
    pub fn doc_count(&self) -> u64 {
        self.max_doc_id
    }

    pub fn trigram_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.max_doc_id == 0
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            doc_count: self.max_doc_id,
            trigram_count: self.postings.len(),
            unsearchable_docs: self.unsearchable_docs,
            ..IndexStats::default()
        };
        for docs in self.postings.values() {
            let len = docs.len();
            stats.posting_count += len;
            stats.max_posting_len = stats.max_posting_len.max(len);
        }
        stats
    }
}
