use cipherforge::config::Config;
use cipherforge::consts::{AUTO_THREADS, DEFAULT_SWAPS, DEFAULT_TRIALS, ENGLISH_ALPHABET};
use cipherforge::{CipherForgeError, Weighting};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::fs;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let argv = std::iter::once("test").chain(args.iter().copied());
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.search.seed, 0);
    assert_eq!(config.search.trials, DEFAULT_TRIALS);
    assert_eq!(config.search.swaps, DEFAULT_SWAPS);
    assert_eq!(config.search.threads, AUTO_THREADS);
    assert_eq!(config.scoring.alphabet, ENGLISH_ALPHABET);
    assert_eq!(config.scoring.ngram_size, 4);
    assert_eq!(config.scoring.weighting, Weighting::LogProbability);
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (config, _) = parse(&[]);
    let default = Config::default();
    assert_eq!(config.search.trials, default.search.trials);
    assert_eq!(config.search.threads, default.search.threads);
    assert_eq!(config.scoring.weighting, default.scoring.weighting);
}

#[test]
fn test_negative_thread_count_parses() {
    let (config, _) = parse(&["-j", "-1", "--weighting", "raw"]);
    assert_eq!(config.search.threads, -1);
    assert_eq!(config.scoring.weighting, Weighting::Raw);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "search": { "seed": 42 }, "scoring": { "weighting": "raw" } }"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.search.seed, 42);
    assert_eq!(config.search.trials, DEFAULT_TRIALS);
    assert_eq!(config.scoring.weighting, Weighting::Raw);
    assert_eq!(config.scoring.alphabet, ENGLISH_ALPHABET);
}

#[test]
fn test_missing_file_is_config_error() {
    let result = Config::load_from_file("/definitely/not/here.json");
    assert!(matches!(result, Err(CipherForgeError::Config(_))));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "search": { "seed": "abc" } }"#).unwrap();

    let result = Config::load_from_file(&path);
    assert!(matches!(result, Err(CipherForgeError::Json(_))));
}

#[test]
fn test_merge_only_overrides_explicit_flags() {
    let mut file_config: Config =
        serde_json::from_str(r#"{ "search": { "seed": 7, "trials": 3, "swaps": 99 } }"#).unwrap();

    let (cli, matches) = parse(&["--trials", "50", "--alphabet", "abcdef"]);
    file_config.merge_from_cli(&cli, &matches);

    // Typed on the command line.
    assert_eq!(file_config.search.trials, 50);
    assert_eq!(file_config.scoring.alphabet, "abcdef");
    // From the file, untouched by clap defaults.
    assert_eq!(file_config.search.seed, 7);
    assert_eq!(file_config.search.swaps, 99);
}

#[test]
fn test_config_round_trips_through_json() {
    let mut config = Config::default();
    config.search.threads = 3;
    config.scoring.weighting = Weighting::Raw;

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""weighting":"raw""#));

    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back.search.threads, 3);
    assert_eq!(back.scoring.weighting, Weighting::Raw);
}
