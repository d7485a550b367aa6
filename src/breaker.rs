use crate::alphabet::{Alphabet, Key};
use crate::error::CfResult;
use crate::normalizer::Normalizer;
use crate::optimizer::{hardware_parallelism, resolve_worker_count, Optimizer, SearchOptions};
use crate::scorer::Scorer;
use crate::transform::SubstitutionTable;
use std::sync::Arc;
use tracing::info;

/// What a call to [`SubstitutionBreaker::fit`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    /// Score of the adopted key, `-inf` when nothing was scored.
    pub score: f64,
    pub workers: usize,
    pub trials_per_worker: usize,
    /// False when no trial produced a candidate and the keys were kept.
    pub updated: bool,
}

/// Recovers a monoalphabetic substitution key from ciphertext alone.
///
/// Both keys start as the identity. `fit` is the only operation that changes
/// them; the encryption key is always derived as the inverse of the
/// decryption key.
pub struct SubstitutionBreaker<N: Normalizer, S: Scorer> {
    normalizer: N,
    scorer: Arc<S>,
    alphabet: Alphabet,
    decryption: Key,
    encryption: Key,
    workers: usize,
}

impl<N: Normalizer, S: Scorer> SubstitutionBreaker<N, S> {
    /// `threads` is a requested worker count; [`crate::consts::AUTO_THREADS`]
    /// uses all hardware parallelism.
    pub fn new(normalizer: N, scorer: S, alphabet: &str, threads: i32) -> CfResult<Self> {
        let alphabet = Alphabet::parse(alphabet)?;
        let workers = resolve_worker_count(threads, hardware_parallelism());
        let identity = alphabet.identity();

        Ok(Self {
            normalizer,
            scorer: Arc::new(scorer),
            decryption: identity.clone(),
            encryption: identity,
            alphabet,
            workers,
        })
    }

    pub fn decryption_key(&self) -> &Key {
        &self.decryption
    }

    pub fn encryption_key(&self) -> &Key {
        &self.encryption
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Searches for the decryption key of `ciphertext`.
    ///
    /// Runs `ceil(trials / workers)` trials of `swaps` proposals on every
    /// worker and adopts the best key found. With no scored candidate (zero
    /// trials or zero swaps) the current keys stay in place.
    pub fn fit(
        &mut self,
        ciphertext: &str,
        seed: u64,
        trials: u32,
        swaps: u32,
    ) -> CfResult<FitSummary> {
        let text = self.normalizer.normalize(ciphertext);

        let options = SearchOptions::builder()
            .workers(self.workers)
            .trials(trials)
            .swaps(swaps)
            .build();
        let trials_per_worker = options.trials_per_worker();

        let optimizer = Optimizer::new(self.alphabet.clone(), Arc::clone(&self.scorer), options);
        let outcome = optimizer.run(text.as_bytes(), seed)?;

        let (score, updated) = match outcome.best() {
            Some(best) => {
                self.install_key(best.best.key.as_bytes().to_vec())?;
                info!(
                    score = best.best.score,
                    worker = best.worker,
                    key = %self.decryption,
                    "fit complete"
                );
                (best.best.score, true)
            }
            None => {
                info!("fit scored no candidates; keeping current key");
                (f64::NEG_INFINITY, false)
            }
        };

        Ok(FitSummary {
            score,
            workers: self.workers,
            trials_per_worker,
            updated,
        })
    }

    fn install_key(&mut self, symbols: Vec<u8>) -> CfResult<()> {
        let decryption = Key::from_symbols(&self.alphabet, symbols)?;
        self.encryption = decryption.inverse(&self.alphabet);
        self.decryption = decryption;
        Ok(())
    }

    /// Decodes `text` with the decryption key.
    pub fn transform(&self, text: &str) -> String {
        SubstitutionTable::from_key(&self.alphabet, &self.decryption).apply(text)
    }

    /// Encodes `text` with the encryption key.
    pub fn inverse_transform(&self, text: &str) -> String {
        SubstitutionTable::from_key(&self.alphabet, &self.encryption).apply(text)
    }
}
