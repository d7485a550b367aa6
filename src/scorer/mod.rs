pub mod loader;
pub mod ngram;

pub use self::ngram::{NgramScorer, NgramTable};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Estimates how plausible a candidate decoding is. Higher is better.
///
/// Called concurrently from every search worker on normalized bytes, so
/// implementations must be free of side effects.
pub trait Scorer: Send + Sync {
    fn score(&self, text: &[u8]) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&[u8]) -> f64 + Send + Sync,
{
    #[inline(always)]
    fn score(&self, text: &[u8]) -> f64 {
        self(text)
    }
}

/// How raw frequency-table weights are turned into per-n-gram scores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Weighting {
    /// Weights are used as given; unknown n-grams weigh nothing.
    Raw,
    /// Weights become log10 probabilities with a floor for unknown n-grams.
    #[default]
    #[value(name = "log")]
    #[serde(rename = "log")]
    #[strum(serialize = "log")]
    LogProbability,
}
