//! Count command implementation - number of optimal alignments without
//! enumerating them

use anyhow::Result;
use clap::Args;
use optalign_core::{count_paths, AlignmentMatrix};

use super::{parse_start, ScoringArgs};
use crate::config::Config;
use crate::error::CliError;

#[derive(Args, Debug, Clone)]
pub struct CountArgs {
    /// First sequence (matrix columns)
    #[arg(allow_hyphen_values = true)]
    pub seq1: String,

    /// Second sequence (matrix rows)
    #[arg(allow_hyphen_values = true)]
    pub seq2: String,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Count from ROW,COL instead of the bottom-right cell
    #[arg(long, value_name = "ROW,COL")]
    pub start: Option<String>,
}

pub fn count(config: &Config, args: &CountArgs) -> Result<u128> {
    let scheme = args.scoring.resolve(config);
    let start = args.start.as_deref().map(parse_start).transpose()?;
    let matrix = AlignmentMatrix::build(&args.seq1, &args.seq2, &scheme);

    let total = count_paths(&matrix, start).map_err(CliError::from)?;
    let limit = config.traceback.max_paths;
    if limit > 0 && total > limit as u128 {
        log::warn!(
            "{} optimal alignments exceed the configured limit of {}",
            total,
            limit
        );
    }
    Ok(total)
}

pub fn execute(config: &Config, args: CountArgs) -> Result<()> {
    println!("{}", count(config, &args)?);
    Ok(())
}
