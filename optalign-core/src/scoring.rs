//! Scoring scheme: operation costs and the comparison mode.
//!
//! Costs are given on the command line as a compact string such as
//! `M20R-1I-1D-1`: each operation letter followed by an optionally signed
//! decimal. Letters may appear in any order and any subset may be given;
//! unspecified operations keep the defaults `M0 R1 I1 D1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Non-fatal configuration problem. The offending item is skipped and a
/// default is used instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigWarning {
    #[error("Unknown operation '{symbol}' at position {position} in cost string, ignored")]
    UnknownOperation { symbol: char, position: usize },

    #[error("Operation '{op}' has no numeric value, keeping default {default}")]
    MissingValue { op: char, default: f64 },

    #[error("Unknown matrix mode \"{given}\", using \"{fallback}\"")]
    UnknownMode { given: String, fallback: Mode },
}

/// A value parsed leniently, with the warnings collected along the way
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<ConfigWarning>,
}

impl<T> Parsed<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Report every warning through the `log` facade and return the value
    pub fn into_logged(self) -> T {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
        self.value
    }
}

/// Whether the matrix holds distances (minimised) or similarities (maximised)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "min")]
    Minimize,
    #[serde(rename = "max")]
    Maximize,
}

impl Mode {
    /// Parse `min`/`max` (or `distance`/`similarity`). Anything else falls
    /// back to the default mode with a warning.
    pub fn parse_lenient(s: &str) -> Parsed<Mode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "distance" => Parsed::clean(Mode::Minimize),
            "max" | "similarity" => Parsed::clean(Mode::Maximize),
            _ => Parsed {
                value: Mode::default(),
                warnings: vec![ConfigWarning::UnknownMode {
                    given: s.to_string(),
                    fallback: Mode::default(),
                }],
            },
        }
    }

    /// Select the extremum of the candidate values
    pub fn select(self, candidates: &[f64]) -> f64 {
        let fold: fn(f64, f64) -> f64 = match self {
            Mode::Minimize => f64::min,
            Mode::Maximize => f64::max,
        };
        candidates
            .iter()
            .copied()
            .reduce(fold)
            .unwrap_or(0.0)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Mode::Minimize => "distance",
            Mode::Maximize => "similarity",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Minimize => write!(f, "min"),
            Mode::Maximize => write!(f, "max"),
        }
    }
}

/// Costs of the four edit operations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    pub match_cost: f64,
    pub replace_cost: f64,
    pub insert_cost: f64,
    pub delete_cost: f64,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            match_cost: 0.0,
            replace_cost: 1.0,
            insert_cost: 1.0,
            delete_cost: 1.0,
        }
    }
}

impl Costs {
    pub fn new(match_cost: f64, replace_cost: f64, insert_cost: f64, delete_cost: f64) -> Self {
        Self {
            match_cost,
            replace_cost,
            insert_cost,
            delete_cost,
        }
    }

    fn slot(&mut self, op: char) -> Option<&mut f64> {
        match op {
            'M' => Some(&mut self.match_cost),
            'R' => Some(&mut self.replace_cost),
            'I' => Some(&mut self.insert_cost),
            'D' => Some(&mut self.delete_cost),
            _ => None,
        }
    }

    /// Parse a cost string of the form `M<#>R<#>I<#>D<#>`.
    ///
    /// Operation letters are case-insensitive and whitespace is ignored.
    /// Unknown characters and letters without a number produce warnings.
    pub fn parse(spec: &str) -> Parsed<Costs> {
        let mut costs = Costs::default();
        let mut warnings = Vec::new();
        let chars: Vec<char> = spec.chars().collect();
        let mut pos = 0;

        while pos < chars.len() {
            let symbol = chars[pos];
            if symbol.is_whitespace() {
                pos += 1;
                continue;
            }

            let op = symbol.to_ascii_uppercase();
            if costs.slot(op).is_none() {
                warnings.push(ConfigWarning::UnknownOperation {
                    symbol,
                    position: pos,
                });
                pos += 1;
                continue;
            }

            let (value, next) = scan_number(&chars, pos + 1);
            pos = next;
            match (value, costs.slot(op)) {
                (Some(v), Some(slot)) => *slot = v,
                (None, Some(slot)) => warnings.push(ConfigWarning::MissingValue {
                    op,
                    default: *slot,
                }),
                (_, None) => {}
            }
        }

        Parsed {
            value: costs,
            warnings,
        }
    }

    /// Compact representation accepted by [`Costs::parse`]
    pub fn to_spec(&self) -> String {
        format!(
            "M{}R{}I{}D{}",
            self.match_cost, self.replace_cost, self.insert_cost, self.delete_cost
        )
    }
}

/// Read an optionally signed decimal starting at `start`. Returns the value
/// (if any digits were found) and the index of the first unread character.
fn scan_number(chars: &[char], start: usize) -> (Option<f64>, usize) {
    let mut end = start;
    if end < chars.len() && (chars[end] == '+' || chars[end] == '-') {
        end += 1;
    }
    let digits_start = end;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if end + 1 < chars.len() && chars[end] == '.' && chars[end + 1].is_ascii_digit() {
        end += 1;
        while end < chars.len() && chars[end].is_ascii_digit() {
            end += 1;
        }
        has_digits = true;
    }

    if !has_digits {
        // A dangling sign is consumed together with the letter.
        return (None, end);
    }

    let text: String = chars[start..end].iter().collect();
    (text.parse::<f64>().ok(), end)
}

/// Operation costs together with the comparison mode. Immutable once built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreScheme {
    pub costs: Costs,
    pub mode: Mode,
}

impl ScoreScheme {
    pub fn new(costs: Costs, mode: Mode) -> Self {
        Self { costs, mode }
    }

    /// Edit distance: `M0 R1 I1 D1`, minimised
    pub fn edit_distance() -> Self {
        Self::default()
    }

    /// Parse the cost string and the mode string of the command line
    pub fn from_specs(costs: &str, mode: &str) -> Parsed<ScoreScheme> {
        let costs = Costs::parse(costs);
        let mode = Mode::parse_lenient(mode);
        let mut warnings = costs.warnings;
        warnings.extend(mode.warnings);
        Parsed {
            value: Self::new(costs.value, mode.value),
            warnings,
        }
    }

    /// Cost of aligning symbol `a` against symbol `b`
    pub fn substitution(&self, a: char, b: char) -> f64 {
        if a == b {
            self.costs.match_cost
        } else {
            self.costs.replace_cost
        }
    }
}
