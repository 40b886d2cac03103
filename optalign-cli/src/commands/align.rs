//! Align command implementation - enumerate every optimal global alignment

use anyhow::{Context, Result};
use clap::Args;
use optalign_core::{AlignerOptions, AlignmentReport, GlobalAligner};

use super::{parse_start, ScoringArgs};
use crate::config::{Config, OutputFormat, TracebackConfig};
use crate::error::CliError;
use crate::render::{MatrixView, ReportView};

#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    /// First sequence (matrix columns)
    #[arg(allow_hyphen_values = true)]
    pub seq1: String,

    /// Second sequence (matrix rows)
    #[arg(allow_hyphen_values = true)]
    pub seq2: String,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    /// Maximum number of alignments to enumerate (0 = no limit)
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Trace back from ROW,COL instead of the bottom-right cell
    #[arg(long, value_name = "ROW,COL")]
    pub start: Option<String>,

    /// Gap symbol
    #[arg(long)]
    pub gap: Option<char>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the filled matrix before the alignments
    #[arg(long)]
    pub matrix: bool,

    /// Reconstruct alignments on the calling thread only
    #[arg(long)]
    pub sequential: bool,
}

impl AlignArgs {
    fn options(&self, config: &Config, verbose: bool) -> Result<AlignerOptions> {
        let start = self.start.as_deref().map(parse_start).transpose()?;
        let traceback = TracebackConfig {
            max_paths: self.max_paths.unwrap_or(config.traceback.max_paths),
        };

        Ok(AlignerOptions {
            traceback: traceback.params(),
            start,
            gap: self.gap.unwrap_or(config.output.gap),
            parallel: config.general.parallel && !self.sequential,
            verbose,
        })
    }
}

/// Run the alignment and return the report with its rendered output
pub fn run(config: &Config, args: &AlignArgs, verbose: bool) -> Result<(AlignmentReport, String)> {
    let scheme = args.scoring.resolve(config);
    let options = args.options(config, verbose)?;
    let aligner = GlobalAligner::with_options(scheme, options);

    log::info!(
        "Aligning {} symbol(s) against {} symbol(s) ({})",
        args.seq1.chars().count(),
        args.seq2.chars().count(),
        scheme.mode.describe()
    );

    let matrix = aligner.build_matrix(&args.seq1, &args.seq2);
    log::debug!(
        "Matrix {}x{} filled, {} tied cell(s)",
        matrix.rows(),
        matrix.cols(),
        matrix.tie_count()
    );

    let report = aligner.report(&matrix).map_err(CliError::from)?;

    let output = match args.format.unwrap_or(config.output.format) {
        OutputFormat::Text => {
            let show_matrix = args.matrix || config.output.show_matrix;
            ReportView {
                report: &report,
                matrix: show_matrix
                    .then(|| MatrixView::new(&matrix, config.output.show_pointers)),
            }
            .to_string()
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize alignment report")?;
            json.push('\n');
            json
        }
    };

    Ok((report, output))
}

pub fn execute(config: &Config, args: AlignArgs, verbose: bool) -> Result<()> {
    let (report, output) = run(config, &args, verbose)?;
    print!("{}", output);
    log::info!("Reported {} alignment(s)", report.len());
    Ok(())
}
