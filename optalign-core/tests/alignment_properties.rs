use optalign_core::{
    count_paths, AlignerOptions, Costs, EditOp, GlobalAligner, Mode, ScoreScheme,
    TracebackParams,
};
use proptest::prelude::*;

fn scheme_strategy() -> impl Strategy<Value = ScoreScheme> {
    (-3i32..=3, -3i32..=3, -3i32..=3, -3i32..=3, any::<bool>()).prop_map(|(m, r, i, d, max)| {
        let costs = Costs::new(m as f64, r as f64, i as f64, d as f64);
        let mode = if max { Mode::Maximize } else { Mode::Minimize };
        ScoreScheme::new(costs, mode)
    })
}

fn aligner(scheme: ScoreScheme) -> GlobalAligner {
    GlobalAligner::with_options(
        scheme,
        AlignerOptions {
            traceback: TracebackParams::unbounded(),
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_rows_have_equal_length_and_reproduce_inputs(
        a in "[abc]{0,6}",
        b in "[abc]{0,6}",
        scheme in scheme_strategy(),
    ) {
        let report = aligner(scheme).align(&a, &b).unwrap();
        prop_assert!(!report.is_empty());
        for scored in &report.alignments {
            let aligned = &scored.alignment;
            prop_assert_eq!(aligned.aligned1.chars().count(), aligned.aligned2.chars().count());
            prop_assert_eq!(aligned.ungapped1(), a.clone());
            prop_assert_eq!(aligned.ungapped2(), b.clone());
        }
    }

    #[test]
    fn test_edit_codes_agree_with_columns(
        a in "[ab]{0,6}",
        b in "[ab]{0,6}",
        scheme in scheme_strategy(),
    ) {
        let report = aligner(scheme).align(&a, &b).unwrap();
        for scored in &report.alignments {
            let aligned = &scored.alignment;
            prop_assert_eq!(scored.edit_script.len(), aligned.len());
            for ((x, y), op) in aligned.columns().zip(scored.edit_script.iter()) {
                let expected = if x == aligned.gap {
                    EditOp::Insert
                } else if y == aligned.gap {
                    EditOp::Delete
                } else if x == y {
                    EditOp::Match
                } else {
                    EditOp::Replace
                };
                prop_assert_eq!(*op, expected);
            }
        }
    }

    #[test]
    fn test_every_alignment_scores_the_optimum(
        a in "[abc]{0,6}",
        b in "[abc]{0,6}",
        scheme in scheme_strategy(),
    ) {
        let report = aligner(scheme).align(&a, &b).unwrap();
        for scored in &report.alignments {
            prop_assert_eq!(scored.alignment.score, report.score);
            // Integer costs keep the float sums exact.
            prop_assert_eq!(scored.summary.cost(&scheme.costs), report.score);
        }
    }

    #[test]
    fn test_alignments_are_distinct_and_counted(
        a in "[ab]{0,5}",
        b in "[ab]{0,5}",
        scheme in scheme_strategy(),
    ) {
        let aligner = aligner(scheme);
        let report = aligner.align(&a, &b).unwrap();

        let mut rows: Vec<(String, String)> = report
            .alignments
            .iter()
            .map(|s| (s.alignment.aligned1.clone(), s.alignment.aligned2.clone()))
            .collect();
        let total = rows.len();
        rows.sort();
        rows.dedup();
        prop_assert_eq!(rows.len(), total);

        let matrix = aligner.build_matrix(&a, &b);
        prop_assert_eq!(count_paths(&matrix, None).unwrap(), total as u128);
    }

    #[test]
    fn test_output_order_is_deterministic(
        a in "[ab]{0,5}",
        b in "[ab]{0,5}",
        scheme in scheme_strategy(),
    ) {
        let first = aligner(scheme).align(&a, &b).unwrap();
        let second = aligner(scheme).align(&a, &b).unwrap();
        prop_assert_eq!(first.alignments, second.alignments);
    }
}
