use crate::index::types::{bytes_to_trigram, trigram_to_bytes, Trigram};

/// Default input length at which distinct extraction switches to the bitset
pub const DEFAULT_BITSET_THRESHOLD: usize = 1024;

/// Bitset for tracking which trigrams have been seen.
/// Uses 2MB to cover all 16M possible trigram values (24 bits).
struct TrigramBitset {
    bits: Vec<u64>,
}

impl TrigramBitset {
    /// Create a new bitset (2MB allocation, zeroed)
    #[inline]
    fn new() -> Self {
        // 16M trigrams / 64 bits per u64 = 262144 u64s = 2MB
        Self {
            bits: vec![0u64; 262144],
        }
    }

    /// Set the bit for a trigram. Returns true if it was already set.
    #[inline]
    fn test_and_set(&mut self, trigram: Trigram) -> bool {
        let idx = (trigram >> 6) as usize;
        let bit = 1u64 << (trigram & 63);
        let was_set = (self.bits[idx] & bit) != 0;
        self.bits[idx] |= bit;
        was_set
    }

    /// Collect all set trigrams in ascending order
    fn collect(&self) -> Vec<Trigram> {
        let mut result = Vec::with_capacity(8192);
        for (word_idx, &word) in self.bits.iter().enumerate() {
            if word == 0 {
                continue;
            }
            let base = (word_idx as u32) << 6;
            let mut w = word;
            while w != 0 {
                let bit_pos = w.trailing_zeros();
                result.push(base | bit_pos);
                w &= w - 1; // clear lowest set bit
            }
        }
        result
    }
}

/// Extract every trigram of `content` in positional order.
///
/// Text is treated as raw bytes, so multi-byte UTF-8 characters are split at
/// byte boundaries. Duplicates are kept: a text of length `L >= 3` always
/// yields exactly `L - 2` trigrams, and shorter text yields none.
pub fn extract_trigrams(content: &[u8]) -> Vec<Trigram> {
    if content.len() < 3 {
        return Vec::new();
    }

    content
        .windows(3)
        .map(|w| bytes_to_trigram(w[0], w[1], w[2]))
        .collect()
}

/// Extract the distinct trigrams of `content`, sorted ascending.
pub fn unique_trigrams(content: &[u8]) -> Vec<Trigram> {
    unique_trigrams_with_threshold(content, DEFAULT_BITSET_THRESHOLD)
}

/// Distinct extraction with an explicit switch-over point to the bitset path.
pub fn unique_trigrams_with_threshold(content: &[u8], bitset_threshold: usize) -> Vec<Trigram> {
    if content.len() < 3 {
        return Vec::new();
    }

    // Small inputs: sort+dedup is more cache-friendly than a 2MB bitset
    if content.len() < bitset_threshold {
        let mut trigrams = extract_trigrams(content);
        trigrams.sort_unstable();
        trigrams.dedup();
        return trigrams;
    }

    let mut bitset = TrigramBitset::new();
    for window in content.windows(3) {
        bitset.test_and_set(bytes_to_trigram(window[0], window[1], window[2]));
    }
    bitset.collect()
}

/// Render a trigram for display, escaping non-printable bytes
pub fn format_trigram(trigram: Trigram) -> String {
    trigram_to_bytes(trigram)
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}

/// Check if content is likely binary
pub fn is_binary(content: &[u8]) -> bool {
    let sample_size = content.len().min(8192);
    let sample = &content[..sample_size];

    let null_count = sample.iter().filter(|&&b| b == 0).count();
    if null_count > sample_size / 10 {
        return true;
    }

    let non_text_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    non_text_count > sample_size / 8
}
