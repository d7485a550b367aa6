/// The lowercase English alphabet, the default symbol set.
pub const ENGLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Requested thread count meaning "use all available hardware parallelism".
pub const AUTO_THREADS: i32 = -1;

/// Marks a byte that is not part of the alphabet in a position map.
pub const SYMBOL_NOT_FOUND: u8 = 255;

/// Smallest alphabet that still admits a swap.
pub const MIN_ALPHABET_LEN: usize = 2;

/// Longest n-gram that fits a packed `u64` key.
pub const MAX_NGRAM_SIZE: usize = 8;

pub const DEFAULT_TRIALS: u32 = 20;
pub const DEFAULT_SWAPS: u32 = 2000;

/// Quadgrams.
pub const DEFAULT_NGRAM_SIZE: usize = 4;
