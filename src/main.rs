use cipherforge::config::Config;
use cipherforge::CfResult;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with search and scoring settings; explicit flags win.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recover the key of a substitution ciphertext and decode it.
    Solve(cmd::solve::SolveArgs),
    /// Apply a known key to a text.
    Encrypt(cmd::encrypt::EncryptArgs),
    /// Build an n-gram frequency table from a training text.
    Ngrams(cmd::ngrams::NgramsArgs),
}

fn resolve_config(
    path: Option<&str>,
    cli_config: &Config,
    sub_matches: &ArgMatches,
) -> CfResult<Config> {
    let Some(path) = path else {
        return Ok(cli_config.clone());
    };

    info!("⚖️  Loading settings from: {}", path);
    let mut file_config = Config::load_from_file(path)?;
    file_config.merge_from_cli(cli_config, sub_matches);
    Ok(file_config)
}

fn main() {
    // Raw matches tell explicit flags apart from defaults when merging.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let result: CfResult<()> = match cli.command {
        Commands::Solve(args) => {
            let config = match matches.subcommand_matches("solve") {
                Some(sub) => resolve_config(cli.config_file.as_deref(), &args.config, sub),
                None => Ok(args.config.clone()),
            };
            config.and_then(|config| cmd::solve::run(args, config))
        }
        Commands::Encrypt(args) => cmd::encrypt::run(args),
        Commands::Ngrams(args) => cmd::ngrams::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
