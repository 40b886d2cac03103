use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod render;

use commands::{align::AlignArgs, count::CountArgs, matrix::MatrixArgs};
use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "optalign")]
#[command(about = "Every optimal global alignment of two sequences")]
#[command(version)]
#[command(long_about = "
optalign fills the edit-distance (or similarity) matrix of two sequences,
keeps every tied optimal move, and prints each optimal global alignment
with its edit transcript (M = match, R = replace, I = insert, D = delete).

Examples:
  optalign align vintner writers
  optalign align vintners writers --scores M20R-1I-1D-1 --type max
  optalign align acgt agt --matrix --format json
  optalign matrix ab ba --no-pointers
  optalign count aaaaaaaa aaaa
  optalign config --output optalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output (-v debug with matrix and path dumps, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate every optimal global alignment
    Align(AlignArgs),

    /// Print the filled score matrix with traceback pointers
    Matrix(MatrixArgs),

    /// Count optimal alignments without enumerating them
    Count(CountArgs),

    /// Print or write a sample configuration file
    Config {
        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(CliError::file_not_found(path.clone()).into());
        }
    }

    let config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    let verbose = !cli.quiet && cli.verbose > 0;

    match cli.command {
        Commands::Align(args) => commands::align::execute(&config, args, verbose),
        Commands::Matrix(args) => commands::matrix::execute(&config, args),
        Commands::Count(args) => commands::count::execute(&config, args),
        Commands::Config { output } => commands::config::execute(output),
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align_arguments() {
        let cli = Cli::try_parse_from([
            "optalign", "align", "vintners", "writers", "--scores", "M20R-1I-1D-1",
            "--type", "max", "--start", "3,4", "--format", "json", "-v",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Align(args) => {
                assert_eq!(args.seq1, "vintners");
                assert_eq!(args.scoring.scores.as_deref(), Some("M20R-1I-1D-1"));
                assert_eq!(args.scoring.mode.as_deref(), Some("max"));
                assert_eq!(args.start.as_deref(), Some("3,4"));
                assert_eq!(args.format, Some(config::OutputFormat::Json));
            }
            _ => panic!("expected the align command"),
        }
    }

    #[test]
    fn test_parse_empty_sequence() {
        let cli = Cli::try_parse_from(["optalign", "count", "", "abc"]).unwrap();
        match cli.command {
            Commands::Count(args) => {
                assert!(args.seq1.is_empty());
                assert_eq!(args.seq2, "abc");
            }
            _ => panic!("expected the count command"),
        }
    }
}
