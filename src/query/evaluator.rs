use crate::error::{IndexError, Result};
use crate::index::store::TrigramIndex;
use crate::index::types::DocId;
use crate::utils::extract_trigrams;
use rayon::prelude::*;
use roaring::RoaringTreemap;
use tracing::trace;

/// Evaluates substring queries against a [`TrigramIndex`].
///
/// Results are candidates: every trigram of the query occurs somewhere in
/// each returned document, but not necessarily as one contiguous match.
pub struct QueryEvaluator<'a> {
    index: &'a TrigramIndex,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(index: &'a TrigramIndex) -> Self {
        Self { index }
    }

    /// Run a query and return matching document ids in ascending order
    pub fn query(&self, text: &[u8]) -> Result<Vec<DocId>> {
        Ok(self.candidates(text)?.iter().collect())
    }

    /// Compute the candidate set for a query.
    ///
    /// The returned bitmap is owned by the caller; posting lists in the
    /// index are only ever read.
    pub fn candidates(&self, text: &[u8]) -> Result<RoaringTreemap> {
        let trigrams = extract_trigrams(text);
        let Some((&first, rest)) = trigrams.split_first() else {
            return Err(IndexError::QueryTooShort { len: text.len() });
        };

        let Some(seed) = self.index.postings(first) else {
            trace!(trigram = first, "first trigram not indexed");
            return Ok(RoaringTreemap::new());
        };
        let mut candidates = seed.clone();

        for &trigram in rest {
            let Some(docs) = self.index.postings(trigram) else {
                trace!(trigram, "trigram not indexed, no document can match");
                return Ok(RoaringTreemap::new());
            };
            candidates = intersect(&candidates, docs);
            if candidates.is_empty() {
                break;
            }
        }

        Ok(candidates)
    }

    /// Run many queries, in parallel once the batch is large enough
    pub fn query_batch<T>(&self, queries: &[T]) -> Vec<Result<Vec<DocId>>>
    where
        T: AsRef<[u8]> + Sync,
    {
        if queries.len() >= self.index.config().parallel_threshold {
            queries.par_iter().map(|q| self.query(q.as_ref())).collect()
        } else {
            queries.iter().map(|q| self.query(q.as_ref())).collect()
        }
    }
}

/// Intersect two sets into a new one, iterating the smaller and probing the larger
pub fn intersect(a: &RoaringTreemap, b: &RoaringTreemap) -> RoaringTreemap {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|&id| large.contains(id)).collect()
}

impl TrigramIndex {
    /// Shorthand for [`QueryEvaluator::query`]
    pub fn query(&self, text: &[u8]) -> Result<Vec<DocId>> {
        QueryEvaluator::new(self).query(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::IndexConfig;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn build(docs: &[&str]) -> TrigramIndex {
        let mut index = TrigramIndex::new();
        for doc in docs {
            index.add(doc.as_bytes());
        }
        index
    }

    #[test]
    fn test_single_trigram_query() {
        let index = build(&["abcdef"]);
        assert_eq!(index.query(b"abc").unwrap(), vec![1]);
        assert_eq!(index.query(b"xyz").unwrap(), Vec::<DocId>::new());
    }

    #[test]
    fn test_shared_trigram() {
        let index = build(&["abcdef", "bcdefg"]);
        assert_eq!(index.query(b"bcd").unwrap(), vec![1, 2]);
        assert_eq!(index.query(b"efg").unwrap(), vec![2]);
    }

    #[test]
    fn test_multi_trigram_intersection() {
        let index = build(&["hello world", "help wanted", "say hello"]);
        assert_eq!(index.query(b"hello").unwrap(), vec![1, 3]);
        assert_eq!(index.query(b"hel").unwrap(), vec![1, 2, 3]);
        assert_eq!(index.query(b"help").unwrap(), vec![2]);
    }

    #[test]
    fn test_query_too_short() {
        let index = build(&["abcdef"]);
        for q in ["", "a", "xy"] {
            match index.query(q.as_bytes()) {
                Err(IndexError::QueryTooShort { len }) => assert_eq!(len, q.len()),
                other => panic!("expected QueryTooShort, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_later_trigram_short_circuits() {
        let index = build(&["abcdef"]);
        assert!(index.query(b"abcx").unwrap().is_empty());
    }

    #[test]
    fn test_candidates_are_not_verified() {
        // "abc", "bcd" and "cde" all occur, "abcde" does not
        let index = build(&["abcd--bcde"]);
        assert_eq!(index.query(b"abcde").unwrap(), vec![1]);
    }

    #[test]
    fn test_query_is_read_only() {
        let index = build(&["abcdef", "abcxyz", "zzabcdzz"]);
        let before = index.stats();

        let first = index.query(b"abcd").unwrap();
        for _ in 0..5 {
            assert_eq!(index.query(b"abcd").unwrap(), first);
        }
        assert_eq!(index.query(b"abc").unwrap(), vec![1, 2, 3]);
        assert_eq!(index.stats(), before);
    }

    #[test]
    fn test_intersect_prefers_smaller_side() {
        let small: RoaringTreemap = [2, 4].into_iter().collect();
        let large: RoaringTreemap = (1..100).collect();
        let expected: RoaringTreemap = [2, 4].into_iter().collect();
        assert_eq!(intersect(&small, &large), expected);
        assert_eq!(intersect(&large, &small), expected);
        // inputs are untouched
        assert_eq!(small.len(), 2);
        assert_eq!(large.len(), 99);
    }

    #[test]
    fn test_query_batch() {
        let mut index = TrigramIndex::with_config(IndexConfig {
            parallel_threshold: 2,
            ..IndexConfig::default()
        });
        index.add(b"abcdef");
        index.add(b"bcdefg");

        let results = QueryEvaluator::new(&index).query_batch(&["bcd", "ab", "xyz"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &vec![1, 2]);
        assert!(matches!(results[1], Err(IndexError::QueryTooShort { len: 2 })));
        assert!(results[2].as_ref().unwrap().is_empty());
    }

    fn naive_query(docs: &[Vec<u8>], query: &[u8]) -> Vec<DocId> {
        let wanted: BTreeSet<_> = extract_trigrams(query).into_iter().collect();
        docs.iter()
            .enumerate()
            .filter(|(_, doc)| {
                let have: BTreeSet<_> = extract_trigrams(doc).into_iter().collect();
                wanted.is_subset(&have)
            })
            .map(|(i, _)| i as DocId + 1)
            .collect()
    }

    proptest! {
        #[test]
        fn prop_matches_naive_intersection(
            docs in prop::collection::vec(prop::collection::vec(b'a'..=b'd', 0..24), 1..20),
            query in prop::collection::vec(b'a'..=b'd', 3..6),
        ) {
            let mut index = TrigramIndex::new();
            for doc in &docs {
                index.add(doc);
            }

            let result = index.query(&query).unwrap();
            prop_assert!(result.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(&result, &naive_query(&docs, &query));
            // repeat to catch any mutation of the store
            prop_assert_eq!(index.query(&query).unwrap(), result);
        }

        #[test]
        fn prop_every_document_trigram_finds_document(
            doc in prop::collection::vec(any::<u8>(), 3..64),
        ) {
            let mut index = TrigramIndex::new();
            index.add(b"unrelated filler");
            let id = index.add(&doc);
            for window in doc.windows(3) {
                prop_assert!(index.query(window).unwrap().contains(&id));
            }
        }
    }
}
