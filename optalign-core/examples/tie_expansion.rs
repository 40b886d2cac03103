//! optalign tie expansion demo
//!
//! Fills the matrix for a few small pairs and shows how every tied optimal
//! move turns into its own alignment.

use optalign_core::{count_paths, AlignmentMatrix, Costs, GlobalAligner, Mode, ScoreScheme};

fn main() {
    println!("optalign tie expansion demo");
    println!("===========================\n");

    let distance = ScoreScheme::edit_distance();
    let similarity = ScoreScheme::new(Costs::new(20.0, -1.0, -1.0, -1.0), Mode::Maximize);

    show("ab", "ba", distance);
    show("vintner", "writers", distance);
    show("vintners", "writers", similarity);
    show_counts(distance);
}

fn show(seq1: &str, seq2: &str, scheme: ScoreScheme) {
    println!("{} vs {} ({}, costs {})", seq1, seq2, scheme.mode.describe(), scheme.costs.to_spec());

    match GlobalAligner::new(scheme).align(seq1, seq2) {
        Ok(report) => {
            println!(
                "score {}, {} alignment(s), {} branch point(s)",
                report.score,
                report.len(),
                report.branch_points
            );
            for scored in &report.alignments {
                println!("  {}", scored.alignment.aligned1);
                println!("  {}", scored.alignment.aligned2);
                println!("  {}\n", scored.edit_script);
            }
        }
        Err(e) => println!("alignment failed: {}\n", e),
    }
}

fn show_counts(scheme: ScoreScheme) {
    println!("Optimal alignment counts for a^n vs a^(n/2):");
    for n in [4, 8, 16, 32] {
        let seq1 = "a".repeat(n);
        let seq2 = "a".repeat(n / 2);
        let matrix = AlignmentMatrix::build(&seq1, &seq2, &scheme);
        match count_paths(&matrix, None) {
            Ok(count) => println!("  n = {:>2}: {}", n, count),
            Err(e) => println!("  n = {:>2}: {}", n, e),
        }
    }
}
