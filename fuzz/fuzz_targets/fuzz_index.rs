#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use trindex::{IndexError, TrigramIndex};

#[derive(Arbitrary, Debug)]
struct Input {
    docs: Vec<Vec<u8>>,
    query: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut index = TrigramIndex::new();
    for (i, doc) in input.docs.iter().enumerate() {
        assert_eq!(index.add(doc) as usize, i + 1);
    }

    match index.query(&input.query) {
        Ok(ids) => {
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            // queries never change the store
            assert_eq!(index.query(&input.query).unwrap(), ids);
        }
        Err(IndexError::QueryTooShort { len }) => assert!(len < 3),
        Err(e) => panic!("unexpected error: {}", e),
    }
});
