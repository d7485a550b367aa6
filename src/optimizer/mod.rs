pub mod mutation;
pub mod runner;

pub use self::runner::{
    hardware_parallelism, resolve_worker_count, select_best, Optimizer, SearchOptions,
    SearchOutcome, WorkerResult,
};

use crate::alphabet::{Alphabet, Key};
use crate::scorer::Scorer;
use crate::transform::SubstitutionTable;
use fastrand::Rng;

/// The outcome of one local-search run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    pub score: f64,
    pub key: Key,
}

impl TrialResult {
    /// The "nothing found" result: identity key, `-inf` score. Loses to any
    /// scored candidate.
    pub fn unscored(alphabet: &Alphabet) -> Self {
        Self {
            score: f64::NEG_INFINITY,
            key: alphabet.identity(),
        }
    }

    pub fn is_scored(&self) -> bool {
        self.score > f64::NEG_INFINITY
    }
}

/// Greedy swap-based hill climber over keys of one alphabet.
///
/// Candidates are always derived from the current key; a swap is kept only
/// when it strictly beats the best score of the running trial, so `score`
/// never decreases between restarts.
pub struct Climber<'a, S: Scorer + ?Sized> {
    alphabet: &'a Alphabet,
    text: &'a [u8],
    scorer: &'a S,

    pub key: Vec<u8>,
    pub score: f64,
    pub rng: Rng,

    // Kept in sync with `key` so a swap only touches two entries.
    table: SubstitutionTable,
    buffer: Vec<u8>,
}

impl<'a, S: Scorer + ?Sized> Climber<'a, S> {
    pub fn new(alphabet: &'a Alphabet, text: &'a [u8], scorer: &'a S, rng: Rng) -> Self {
        let key = alphabet.symbols().to_vec();
        let table = SubstitutionTable::new(alphabet, &key);
        Self {
            alphabet,
            text,
            scorer,
            key,
            score: f64::NEG_INFINITY,
            rng,
            table,
            buffer: Vec::with_capacity(text.len()),
        }
    }

    /// Random restart: a fresh uniform permutation with no score yet.
    pub fn restart(&mut self) {
        self.key = mutation::shuffled_key(&mut self.rng, self.alphabet);
        self.table = SubstitutionTable::new(self.alphabet, &self.key);
        self.score = f64::NEG_INFINITY;
    }

    #[inline(always)]
    fn swap_positions(&mut self, a: usize, b: usize) {
        let symbols = self.alphabet.symbols();
        self.key.swap(a, b);
        self.table.set(symbols[a], self.key[a]);
        self.table.set(symbols[b], self.key[b]);
    }

    /// Proposes one swap of the current key. Returns whether it was accepted.
    #[inline(always)]
    pub fn step(&mut self) -> bool {
        let (a, b) = mutation::pick_swap(&mut self.rng, self.key.len());
        self.swap_positions(a, b);

        self.table.apply_bytes_into(self.text, &mut self.buffer);
        let candidate = self.scorer.score(&self.buffer);

        if candidate > self.score {
            self.score = candidate;
            true
        } else {
            self.swap_positions(a, b);
            false
        }
    }

    /// Runs `steps` proposals, returning how many were accepted.
    pub fn evolve(&mut self, steps: usize) -> usize {
        let mut accepted = 0;
        for _ in 0..steps {
            if self.step() {
                accepted += 1;
            }
        }
        accepted
    }

    /// One complete trial: restart, then `swaps` proposals.
    pub fn run_trial(&mut self, swaps: usize) -> TrialResult {
        self.restart();
        self.evolve(swaps);
        self.result()
    }

    pub fn result(&self) -> TrialResult {
        TrialResult {
            score: self.score,
            key: Key::from_permutation(self.key.clone()),
        }
    }
}
