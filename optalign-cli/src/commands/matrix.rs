//! Matrix command implementation - print the filled score matrix

use anyhow::Result;
use clap::Args;
use optalign_core::AlignmentMatrix;

use super::ScoringArgs;
use crate::config::Config;
use crate::render::{HeaderView, MatrixView};

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// First sequence (matrix columns)
    #[arg(allow_hyphen_values = true)]
    pub seq1: String,

    /// Second sequence (matrix rows)
    #[arg(allow_hyphen_values = true)]
    pub seq2: String,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Print values only, without traceback pointers
    #[arg(long)]
    pub no_pointers: bool,
}

pub fn render(config: &Config, args: &MatrixArgs) -> String {
    let scheme = args.scoring.resolve(config);
    let matrix = AlignmentMatrix::build(&args.seq1, &args.seq2, &scheme);
    log::info!(
        "Filled {}x{} matrix, optimal score {}",
        matrix.rows(),
        matrix.cols(),
        matrix.score()
    );

    let pointers = config.output.show_pointers && !args.no_pointers;
    format!(
        "{}\n{}",
        HeaderView {
            seq1: &args.seq1,
            seq2: &args.seq2,
            scheme: &scheme,
        },
        MatrixView::new(&matrix, pointers)
    )
}

pub fn execute(config: &Config, args: MatrixArgs) -> Result<()> {
    print!("{}", render(config, &args));
    Ok(())
}
