use crate::reports;
use cipherforge::config::Config;
use cipherforge::scorer::loader::load_ngram_table;
use cipherforge::{CfResult, EnglishNormalizer, NgramScorer, SubstitutionBreaker};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SolveArgs {
    #[command(flatten)]
    pub config: Config,

    /// Ciphertext file to break.
    pub ciphertext: PathBuf,

    /// Frequency table, one `<ngram> <weight>` per line.
    #[arg(short, long)]
    pub ngrams: PathBuf,

    /// Write the decoded text here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SolveArgs, config: Config) -> CfResult<()> {
    let scoring = &config.scoring;
    let search = &config.search;

    let table = load_ngram_table(&args.ngrams, scoring.ngram_size, scoring.weighting)?;
    info!(
        "📚 Loaded {} {}-grams ({} weighting)",
        table.len(),
        table.n(),
        table.weighting()
    );

    let mut breaker = SubstitutionBreaker::new(
        EnglishNormalizer,
        NgramScorer::new(table),
        &scoring.alphabet,
        search.threads,
    )?;

    info!("📂 Reading ciphertext: {}", args.ciphertext.display());
    let ciphertext = fs::read_to_string(&args.ciphertext)?;

    info!(
        "🔥 Spawning {} workers: {} trials x {} swaps (seed {})",
        breaker.workers(),
        search.trials,
        search.swaps,
        search.seed
    );
    let summary = breaker.fit(&ciphertext, search.seed, search.trials, search.swaps)?;

    reports::print_fit(
        breaker.alphabet(),
        breaker.decryption_key(),
        &summary,
        search.seed,
        search.swaps,
    );

    let plaintext = breaker.transform(&ciphertext);
    match &args.output {
        Some(path) => {
            fs::write(path, plaintext)?;
            info!("💾 Decoded text written to {}", path.display());
        }
        None => print!("{}", plaintext),
    }

    Ok(())
}
