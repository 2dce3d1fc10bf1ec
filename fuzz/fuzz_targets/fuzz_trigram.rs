#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let trigrams = trindex::utils::extract_trigrams(data);
    assert_eq!(trigrams.len(), data.len().saturating_sub(2));

    let unique = trindex::utils::unique_trigrams_with_threshold(data, 64);
    assert!(unique.windows(2).all(|w| w[0] < w[1]));
    assert!(unique.len() <= trigrams.len());
});
