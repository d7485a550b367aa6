use crate::consts::{
    AUTO_THREADS, DEFAULT_NGRAM_SIZE, DEFAULT_SWAPS, DEFAULT_TRIALS, ENGLISH_ALPHABET,
};
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::Weighting;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub scoring: ScoringParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    #[arg(short = 'S', long, default_value_t = 0)]
    pub seed: u64,
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: u32,
    #[arg(long, default_value_t = DEFAULT_SWAPS)]
    pub swaps: u32,

    // -1 means every hardware thread.
    #[arg(short = 'j', long, default_value_t = AUTO_THREADS, allow_negative_numbers = true)]
    pub threads: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            seed: 0,
            trials: DEFAULT_TRIALS,
            swaps: DEFAULT_SWAPS,
            threads: AUTO_THREADS,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    #[arg(long, default_value = ENGLISH_ALPHABET)]
    pub alphabet: String,
    #[arg(long, default_value_t = DEFAULT_NGRAM_SIZE)]
    pub ngram_size: usize,
    #[arg(long, value_enum, default_value_t = Weighting::LogProbability)]
    pub weighting: Weighting,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            alphabet: ENGLISH_ALPHABET.to_string(),
            ngram_size: DEFAULT_NGRAM_SIZE,
            weighting: Weighting::LogProbability,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CipherForgeError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overrides fields with values the user actually typed; clap defaults
    /// never clobber what came from the file.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.seed);
        update_if_present!(search.trials);
        update_if_present!(search.swaps);
        update_if_present!(search.threads);

        update_if_present!(scoring.alphabet);
        update_if_present!(scoring.ngram_size);
        update_if_present!(scoring.weighting);
    }
}
