pub mod alphabet;
pub mod breaker;
pub mod config;
pub mod consts;
pub mod corpus;
pub mod error;
pub mod normalizer;
pub mod optimizer;
pub mod scorer;
pub mod transform;
// cmd and reports belong to the binary (main.rs).

pub use alphabet::{Alphabet, Key};
pub use breaker::{FitSummary, SubstitutionBreaker};
pub use error::{CfResult, CipherForgeError};
pub use normalizer::{EnglishNormalizer, Normalizer};
pub use scorer::{NgramScorer, NgramTable, Scorer, Weighting};
