use super::{Scorer, Weighting};
use crate::consts::MAX_NGRAM_SIZE;
use crate::corpus;
use crate::error::{CfResult, CipherForgeError};
use crate::normalizer::EnglishNormalizer;
use fnv::FnvHashMap;
use tracing::debug;

/// Packs up to eight bytes into a `u64`, first byte most significant.
#[inline(always)]
pub fn pack_gram(gram: &[u8]) -> u64 {
    gram.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// N-gram weights keyed by packed n-gram.
#[derive(Debug, Clone)]
pub struct NgramTable {
    n: usize,
    weights: FnvHashMap<u64, f64>,
    floor: f64,
    weighting: Weighting,
}

impl NgramTable {
    /// Builds a table from `(token, weight)` pairs. Tokens are expected in
    /// normalized form; any whose length is not `n` are ignored and repeated
    /// tokens accumulate.
    pub fn from_entries<I, S>(n: usize, entries: I, weighting: Weighting) -> CfResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        validate_ngram_size(n)?;

        let mut weights: FnvHashMap<u64, f64> = FnvHashMap::default();
        let mut ignored = 0usize;

        for (token, weight) in entries {
            let bytes = token.as_ref().as_bytes();
            if bytes.len() != n || !weight.is_finite() {
                ignored += 1;
                continue;
            }
            *weights.entry(pack_gram(bytes)).or_insert(0.0) += weight;
        }

        let floor = match weighting {
            Weighting::Raw => 0.0,
            Weighting::LogProbability => {
                weights.retain(|_, w| *w > 0.0);
                let total: f64 = weights.values().sum();
                for w in weights.values_mut() {
                    *w = (*w / total).log10();
                }
                (0.01 / total).log10()
            }
        };

        if weights.is_empty() {
            return Err(CipherForgeError::Validation(format!(
                "Frequency table has no usable {}-grams",
                n
            )));
        }

        debug!(
            n,
            grams = weights.len(),
            ignored,
            %weighting,
            "built n-gram table"
        );

        Ok(Self {
            n,
            weights,
            floor,
            weighting,
        })
    }

    /// Counts the n-grams of a training text and weights them.
    pub fn from_text(text: &str, n: usize, weighting: Weighting) -> CfResult<Self> {
        let counts = corpus::count_ngrams(text, n, &EnglishNormalizer)?;
        Self::from_entries(
            n,
            counts.into_iter().map(|(gram, count)| (gram, count as f64)),
            weighting,
        )
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    #[inline(always)]
    fn lookup(&self, code: u64) -> f64 {
        self.weights.get(&code).copied().unwrap_or(self.floor)
    }

    /// Weight of one n-gram, or the floor if the table has never seen it.
    pub fn weight(&self, gram: &str) -> f64 {
        if gram.len() != self.n {
            return self.floor;
        }
        self.lookup(pack_gram(gram.as_bytes()))
    }
}

pub(crate) fn validate_ngram_size(n: usize) -> CfResult<()> {
    if n == 0 || n > MAX_NGRAM_SIZE {
        return Err(CipherForgeError::Config(format!(
            "N-gram size must be between 1 and {}, got {}",
            MAX_NGRAM_SIZE, n
        )));
    }
    Ok(())
}

/// Sums the table weight of every overlapping n-gram window.
#[derive(Debug, Clone)]
pub struct NgramScorer {
    table: NgramTable,
}

impl NgramScorer {
    pub fn new(table: NgramTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &NgramTable {
        &self.table
    }
}

impl Scorer for NgramScorer {
    fn score(&self, text: &[u8]) -> f64 {
        let n = self.table.n;
        if text.len() < n {
            return 0.0;
        }

        let mask = if n == MAX_NGRAM_SIZE {
            u64::MAX
        } else {
            (1u64 << (8 * n)) - 1
        };

        let mut code = 0u64;
        let mut total = 0.0;
        for (i, &b) in text.iter().enumerate() {
            code = ((code << 8) | b as u64) & mask;
            if i + 1 >= n {
                total += self.table.lookup(code);
            }
        }
        total
    }
}
