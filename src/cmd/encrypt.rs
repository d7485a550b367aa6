use cipherforge::consts::ENGLISH_ALPHABET;
use cipherforge::transform::transform;
use cipherforge::{Alphabet, CfResult, Key};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// Plaintext file.
    pub input: PathBuf,

    /// Substitution key, read positionally against the alphabet.
    #[arg(short, long)]
    pub key: String,

    #[arg(long, default_value = ENGLISH_ALPHABET)]
    pub alphabet: String,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: EncryptArgs) -> CfResult<()> {
    let alphabet = Alphabet::parse(&args.alphabet)?;
    let key = Key::parse(&alphabet, &args.key)?;

    let text = fs::read_to_string(&args.input)?;
    let encoded = transform(&alphabet, &key, &text);

    match &args.output {
        Some(path) => {
            fs::write(path, encoded)?;
            info!("💾 Encrypted text written to {}", path.display());
        }
        None => print!("{}", encoded),
    }
    Ok(())
}
