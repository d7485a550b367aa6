use cipherforge::consts::DEFAULT_NGRAM_SIZE;
use cipherforge::corpus::{count_ngrams, render_table};
use cipherforge::{CfResult, EnglishNormalizer};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct NgramsArgs {
    /// Training text.
    pub corpus: PathBuf,

    #[arg(long, default_value_t = DEFAULT_NGRAM_SIZE)]
    pub size: usize,

    /// Keep only the most frequent entries (0 keeps all).
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: NgramsArgs) -> CfResult<()> {
    info!("📂 Counting {}-grams in {}", args.size, args.corpus.display());
    let content = fs::read_to_string(&args.corpus)?;
    let entries = count_ngrams(&content, args.size, &EnglishNormalizer)?;
    info!("   -> {} distinct {}-grams", entries.len(), args.size);

    let table = render_table(&entries, args.top);
    match &args.output {
        Some(path) => {
            fs::write(path, table)?;
            info!("💾 Table written to {}", path.display());
        }
        None => print!("{}", table),
    }
    Ok(())
}
