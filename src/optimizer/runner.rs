use super::{Climber, TrialResult};
use crate::alphabet::Alphabet;
use crate::consts::{AUTO_THREADS, DEFAULT_SWAPS, DEFAULT_TRIALS};
use crate::error::CfResult;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;
use typed_builder::TypedBuilder;

/// Hardware threads available to this process, at least 1.
pub fn hardware_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Turns a requested thread count into a worker count in `1..=available`.
///
/// [`AUTO_THREADS`] takes everything; zero and other negative values fall
/// back to a single worker.
pub fn resolve_worker_count(requested: i32, available: usize) -> usize {
    let max = available.max(1);
    match requested {
        AUTO_THREADS => max,
        n if n <= 0 => 1,
        n => (n as usize).min(max),
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct SearchOptions {
    #[builder(default = 1)]
    pub workers: usize,
    #[builder(default = DEFAULT_TRIALS)]
    pub trials: u32,
    #[builder(default = DEFAULT_SWAPS)]
    pub swaps: u32,
}

impl SearchOptions {
    /// `ceil(trials / workers)`. The total can overshoot `trials` by up to
    /// `workers - 1`.
    pub fn trials_per_worker(&self) -> usize {
        (self.trials as usize).div_ceil(self.workers.max(1))
    }
}

#[derive(Debug, Clone)]
pub struct WorkerResult {
    pub worker: usize,
    pub trials: usize,
    pub best: TrialResult,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// One entry per worker, in worker order.
    pub results: Vec<WorkerResult>,
}

impl SearchOutcome {
    pub fn best(&self) -> Option<&WorkerResult> {
        select_best(&self.results)
    }
}

/// Highest scoring worker result; the lowest index wins a tie. Results that
/// never scored a candidate are not eligible.
pub fn select_best(results: &[WorkerResult]) -> Option<&WorkerResult> {
    let mut best: Option<&WorkerResult> = None;
    for r in results.iter().filter(|r| r.best.is_scored()) {
        match best {
            Some(b) if r.best.score <= b.best.score => {}
            _ => best = Some(r),
        }
    }
    best
}

/// Splits a trial budget across a fixed pool of workers and merges what
/// they find.
pub struct Optimizer<S: Scorer + ?Sized> {
    alphabet: Alphabet,
    scorer: Arc<S>,
    options: SearchOptions,
}

impl<S: Scorer + ?Sized> Optimizer<S> {
    pub fn new(alphabet: Alphabet, scorer: Arc<S>, options: SearchOptions) -> Self {
        Self {
            alphabet,
            scorer,
            options,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs every worker to completion on `text` (already normalized).
    ///
    /// Worker `w` seeds its generator with `seed + w`, so the outcome is fixed
    /// by `(seed, workers, trials, swaps)`.
    pub fn run(&self, text: &[u8], seed: u64) -> CfResult<SearchOutcome> {
        let workers = self.options.workers.max(1);
        let trials = self.options.trials_per_worker();

        debug!(
            workers,
            trials_per_worker = trials,
            swaps = self.options.swaps,
            text_len = text.len(),
            "starting search"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cipherforge-worker-{}", i))
            .build()?;

        let results: Vec<WorkerResult> = pool.install(|| {
            (0..workers)
                .into_par_iter()
                .map(|w| self.run_worker(w, trials, text, seed))
                .collect()
        });

        Ok(SearchOutcome { results })
    }

    fn run_worker(&self, worker: usize, trials: usize, text: &[u8], seed: u64) -> WorkerResult {
        let rng = fastrand::Rng::with_seed(seed.wrapping_add(worker as u64));
        let mut climber = Climber::new(&self.alphabet, text, &*self.scorer, rng);
        let swaps = self.options.swaps as usize;

        let mut best = TrialResult::unscored(&self.alphabet);
        for _ in 0..trials {
            let result = climber.run_trial(swaps);
            if result.score > best.score {
                best = result;
            }
        }

        debug!(worker, trials, score = best.score, key = %best.key, "worker finished");

        WorkerResult {
            worker,
            trials,
            best,
        }
    }
}
