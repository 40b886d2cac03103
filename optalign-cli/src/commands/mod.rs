//! Command implementations for the optalign CLI

pub mod align;
pub mod config;
pub mod count;
pub mod matrix;

use clap::Args;
use optalign_core::{CellIndex, ScoreScheme};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Scoring options shared by every command that fills a matrix
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Operation costs, e.g. "M0R1I1D1" or "M20R-1I-1D-1"
    #[arg(short, long, value_name = "COSTS")]
    pub scores: Option<String>,

    /// Matrix type: min (distance) or max (similarity)
    #[arg(long = "type", value_name = "MODE")]
    pub mode: Option<String>,
}

impl ScoringArgs {
    /// Build the scheme from the command line, falling back to the config.
    /// Malformed parts are logged as warnings and replaced by defaults.
    pub fn resolve(&self, config: &Config) -> ScoreScheme {
        let costs = self.scores.as_deref().unwrap_or(&config.scoring.costs);
        let mode = self.mode.as_deref().unwrap_or(&config.scoring.mode);
        let scheme = ScoreScheme::from_specs(costs, mode).into_logged();
        log::debug!("Scoring: {} ({})", scheme.costs.to_spec(), scheme.mode);
        scheme
    }
}

/// Parse a `ROW,COL` start cell
pub fn parse_start(spec: &str) -> CliResult<CellIndex> {
    let (row, col) = spec
        .split_once(',')
        .ok_or_else(|| CliError::validation(format!("Start cell '{}' is not ROW,COL", spec)))?;

    let parse = |part: &str, name: &str| -> CliResult<usize> {
        part.trim().parse::<usize>().map_err(|_| {
            CliError::validation(format!("Invalid {} '{}' in start cell '{}'", name, part, spec))
        })
    };

    Ok(CellIndex::new(parse(row, "row")?, parse(col, "column")?))
}
