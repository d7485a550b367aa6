/// Maps raw text into the canonical form a [`crate::scorer::Scorer`] expects.
///
/// Implementations must be idempotent. The engine calls this once per `fit`,
/// never inside the search loop.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Keeps ASCII letters only, lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishNormalizer;

impl EnglishNormalizer {
    #[inline(always)]
    pub fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphabetic()
    }
}

impl Normalizer for EnglishNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| Self::is_valid_char(c))
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }
}

impl<F> Normalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, text: &str) -> String {
        self(text)
    }
}
