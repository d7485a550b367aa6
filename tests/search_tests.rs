use cipherforge::optimizer::{resolve_worker_count, Climber, Optimizer, SearchOptions};
use cipherforge::transform::transform;
use cipherforge::{Alphabet, EnglishNormalizer, Key, NgramScorer, NgramTable, Normalizer, Scorer};
use cipherforge::{SubstitutionBreaker, Weighting};
use proptest::prelude::*;
use rstest::rstest;
use std::sync::Arc;

const TRAINING: &str = include_str!("data/training.txt");
const PLAIN: &str = include_str!("data/plain.txt");
const SCRAMBLE: &str = "zyxwvutsrqponmlkjihgfedcba";

fn quadgrams() -> NgramScorer {
    let table = NgramTable::from_text(TRAINING, 4, Weighting::LogProbability).unwrap();
    NgramScorer::new(table)
}

fn ciphertext() -> String {
    let alphabet = Alphabet::english();
    let key = Key::parse(&alphabet, SCRAMBLE).unwrap();
    // First paragraph keeps the search cheap.
    let paragraph = PLAIN.split("\n\n").next().unwrap();
    transform(&alphabet, &key, paragraph)
}

fn breaker(threads: i32) -> SubstitutionBreaker<EnglishNormalizer, NgramScorer> {
    SubstitutionBreaker::new(
        EnglishNormalizer,
        quadgrams(),
        "abcdefghijklmnopqrstuvwxyz",
        threads,
    )
    .unwrap()
}

// --- LOCAL SEARCH ---

#[test]
fn test_trial_score_never_decreases() {
    let alphabet = Alphabet::english();
    let scorer = quadgrams();
    let text = EnglishNormalizer.normalize(&ciphertext());

    let rng = fastrand::Rng::with_seed(7);
    let mut climber = Climber::new(&alphabet, text.as_bytes(), &scorer, rng);
    climber.restart();
    assert_eq!(climber.score, f64::NEG_INFINITY);

    let mut last = climber.score;
    let mut accepted = 0;
    for _ in 0..500 {
        let before = climber.key.clone();
        if climber.step() {
            accepted += 1;
            assert!(climber.score > last);
        } else {
            assert_eq!(climber.key, before, "rejected swap must be reverted");
        }
        assert!(climber.score >= last);
        last = climber.score;
    }

    assert!(accepted > 0);
    assert!(last.is_finite());
}

#[test]
fn test_first_proposal_is_always_accepted() {
    let alphabet = Alphabet::parse("abc").unwrap();
    let scorer = |_: &[u8]| -1.0e9;
    let mut climber = Climber::new(&alphabet, b"abc", &scorer, fastrand::Rng::with_seed(1));

    let result = climber.run_trial(1);
    assert_eq!(result.score, -1.0e9);
    assert!(result.is_scored());
}

#[test]
fn test_equal_scores_are_rejected() {
    // A constant scorer only ever accepts the first swap.
    let alphabet = Alphabet::english();
    let scorer = |_: &[u8]| 1.0;
    let mut climber = Climber::new(&alphabet, b"hello", &scorer, fastrand::Rng::with_seed(3));
    climber.restart();

    assert!(climber.step());
    assert_eq!(climber.evolve(200), 0);
}

struct PositionalScorer;

impl Scorer for PositionalScorer {
    fn score(&self, text: &[u8]) -> f64 {
        text.iter()
            .enumerate()
            .map(|(i, &b)| ((i % 7) as f64) * (b as f64))
            .sum()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_trial_always_returns_a_permutation(
        seed in any::<u64>(),
        swaps in 0usize..200,
        text in "[a-z]{0,80}"
    ) {
        let alphabet = Alphabet::english();
        let scorer = PositionalScorer;
        let rng = fastrand::Rng::with_seed(seed);
        let mut climber = Climber::new(&alphabet, text.as_bytes(), &scorer, rng);

        let result = climber.run_trial(swaps);
        let symbols = result.key.as_bytes().to_vec();
        prop_assert!(Key::from_symbols(&alphabet, symbols).is_ok());
        prop_assert_eq!(result.is_scored(), swaps > 0);
    }
}

// --- COORDINATOR ---

#[rstest]
#[case::auto(-1, 8, 8)]
#[case::zero(0, 8, 1)]
#[case::other_negative(-5, 8, 1)]
#[case::within(3, 8, 3)]
#[case::clamped(64, 8, 8)]
#[case::unknown_hardware(4, 0, 1)]
fn test_resolve_worker_count(#[case] requested: i32, #[case] available: usize, #[case] expected: usize) {
    assert_eq!(resolve_worker_count(requested, available), expected);
}

#[test]
fn test_optimizer_reports_every_worker() {
    let alphabet = Alphabet::english();
    let options = SearchOptions::builder().workers(3).trials(7).swaps(50).build();
    let optimizer = Optimizer::new(alphabet, Arc::new(PositionalScorer), options);

    let outcome = optimizer.run(b"attackatdawn", 11).unwrap();

    assert_eq!(outcome.results.len(), 3);
    for (i, r) in outcome.results.iter().enumerate() {
        assert_eq!(r.worker, i);
        assert_eq!(r.trials, 3);
        assert!(r.best.is_scored());
    }

    let best = outcome.best().unwrap();
    assert!(outcome
        .results
        .iter()
        .all(|r| r.best.score <= best.best.score));
}

#[test]
fn test_fit_is_deterministic() {
    let ciphertext = ciphertext();

    let mut first = breaker(1);
    let mut second = breaker(1);
    let a = first.fit(&ciphertext, 99, 4, 400).unwrap();
    let b = second.fit(&ciphertext, 99, 4, 400).unwrap();

    assert_eq!(first.decryption_key(), second.decryption_key());
    assert_eq!(first.encryption_key(), second.encryption_key());
    assert_eq!(a, b);
}

#[test]
fn test_multi_worker_search_is_deterministic() {
    let alphabet = Alphabet::english();
    let text = EnglishNormalizer.normalize(&ciphertext());
    let options = SearchOptions::builder().workers(3).trials(6).swaps(300).build();
    let optimizer = Optimizer::new(alphabet, Arc::new(quadgrams()), options);

    let first = optimizer.run(text.as_bytes(), 99).unwrap();
    let second = optimizer.run(text.as_bytes(), 99).unwrap();

    assert_eq!(first.results.len(), 3);
    for (a, b) in first.results.iter().zip(&second.results) {
        assert_eq!(a.worker, b.worker);
        assert_eq!(a.trials, 2);
        assert_eq!(a.best, b.best);
    }
    assert_eq!(
        first.best().map(|r| r.worker),
        second.best().map(|r| r.worker)
    );
}

#[test]
fn test_tie_across_workers_goes_to_lowest_index() {
    let alphabet = Alphabet::english();
    let flat = |_: &[u8]| 1.0;
    let options = SearchOptions::builder().workers(4).trials(4).swaps(10).build();
    let optimizer = Optimizer::new(alphabet, Arc::new(flat), options);

    let outcome = optimizer.run(b"attackatdawn", 5).unwrap();

    assert!(outcome.results.iter().all(|r| r.best.score == 1.0));
    assert_eq!(outcome.best().unwrap().worker, 0);
}

#[test]
fn test_fit_keeps_keys_inverse_of_each_other() {
    let ciphertext = ciphertext();
    let mut b = breaker(1);
    b.fit(&ciphertext, 5, 2, 300).unwrap();

    let alphabet = b.alphabet().clone();
    assert_eq!(&b.decryption_key().inverse(&alphabet), b.encryption_key());

    let text = "Any Text, at all.";
    assert_eq!(b.inverse_transform(&b.transform(text)), text);
    assert_eq!(b.transform(&b.inverse_transform(text)), text);
}

#[rstest]
#[case::no_trials(0, 500)]
#[case::no_swaps(8, 0)]
fn test_degenerate_budget_keeps_prior_key(#[case] trials: u32, #[case] swaps: u32) {
    let ciphertext = ciphertext();
    let mut b = breaker(1);

    let summary = b.fit(&ciphertext, 1, trials, swaps).unwrap();
    assert!(!summary.updated);
    assert!(b.decryption_key().is_identity(b.alphabet()));

    // Same after a real fit: the previous key survives.
    b.fit(&ciphertext, 1, 2, 200).unwrap();
    let fitted = b.decryption_key().clone();
    let summary = b.fit(&ciphertext, 1, trials, swaps).unwrap();
    assert!(!summary.updated);
    assert_eq!(summary.score, f64::NEG_INFINITY);
    assert_eq!(b.decryption_key(), &fitted);
}

#[test]
fn test_fewer_trials_than_workers() {
    let alphabet = Alphabet::english();
    let text = EnglishNormalizer.normalize(&ciphertext());
    let options = SearchOptions::builder().workers(4).trials(1).swaps(100).build();
    assert_eq!(options.trials_per_worker(), 1);

    let optimizer = Optimizer::new(alphabet, Arc::new(quadgrams()), options);
    let outcome = optimizer.run(text.as_bytes(), 3).unwrap();

    // Rounding up gives every worker one scored trial.
    assert_eq!(outcome.results.len(), 4);
    for (i, r) in outcome.results.iter().enumerate() {
        assert_eq!(r.worker, i);
        assert_eq!(r.trials, 1);
        assert!(r.best.is_scored());
    }
    assert!(outcome.best().is_some());
}

#[test]
fn test_empty_ciphertext_does_not_crash() {
    let mut b = breaker(1);
    let summary = b.fit("", 1, 2, 10).unwrap();
    // Short text scores zero, which still beats -inf.
    assert!(summary.updated);
    assert_eq!(summary.score, 0.0);
}
