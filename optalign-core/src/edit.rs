//! Edit scripts: per-column classification of an explicit alignment.

use crate::alignment::ExplicitAlignment;
use crate::scoring::Costs;
use crate::types::EditOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One edit code per aligned column, left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

/// Classify every column of `alignment`.
///
/// Gap in row 1 is an insertion (a `seq2` symbol with no `seq1`
/// counterpart), gap in row 2 a deletion, otherwise match or replace.
pub fn edit_script(alignment: &ExplicitAlignment) -> EditScript {
    let ops = alignment
        .columns()
        .map(|(a, b)| {
            if alignment.is_gap(a) {
                EditOp::Insert
            } else if alignment.is_gap(b) {
                EditOp::Delete
            } else if a == b {
                EditOp::Match
            } else {
                EditOp::Replace
            }
        })
        .collect();
    EditScript { ops }
}

impl EditScript {
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Compact `MRID` transcript
    pub fn to_transcript(&self) -> String {
        self.ops.iter().map(|&op| char::from(op)).collect()
    }

    pub fn summary(&self) -> EditSummary {
        let mut summary = EditSummary::default();
        for op in &self.ops {
            match op {
                EditOp::Match => summary.matches += 1,
                EditOp::Replace => summary.replacements += 1,
                EditOp::Insert => summary.insertions += 1,
                EditOp::Delete => summary.deletions += 1,
            }
        }
        summary
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_transcript())
    }
}

/// Operation counts of one edit script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSummary {
    pub matches: usize,
    pub replacements: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl EditSummary {
    pub fn columns(&self) -> usize {
        self.matches + self.replacements + self.insertions + self.deletions
    }

    /// Number of non-match operations
    pub fn edit_distance(&self) -> usize {
        self.replacements + self.insertions + self.deletions
    }

    /// Matches as a percentage of aligned columns
    pub fn identity(&self) -> f64 {
        let total = self.columns();
        if total == 0 {
            return 0.0;
        }
        self.matches as f64 / total as f64 * 100.0
    }

    /// Total cost of the operations under `costs`
    pub fn cost(&self, costs: &Costs) -> f64 {
        self.matches as f64 * costs.match_cost
            + self.replacements as f64 * costs.replace_cost
            + self.insertions as f64 * costs.insert_cost
            + self.deletions as f64 * costs.delete_cost
    }
}
