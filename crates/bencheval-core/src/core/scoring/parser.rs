use thiserror::Error;
use tracing::warn;

/// Energy gap above which a parsed row is treated as a unit or parsing fault
/// rather than a genuine method error.
pub const ENERGY_DIFF_TOLERANCE: f64 = 750.0;

const MIN_TOKENS: usize = 8;
const COMPUTED_FIELD: usize = 5;
const REFERENCE_FIELD: usize = 7;

/// One parsed scoring-output row. `index` is the 0-based position of the
/// originating line among all non-blank output lines and ties the row back to
/// the kept reaction at the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRow {
    pub index: usize,
    pub reference: f64,
    pub computed: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum SkipReason {
    #[error("expected at least {MIN_TOKENS} fields, found {found}")]
    TooFewTokens { found: usize },
    #[error("energy field '{value}' is not a number")]
    NotANumber { value: String },
    #[error(
        "difference between computed ({computed}) and reference ({reference}) energy exceeds {ENERGY_DIFF_TOLERANCE}"
    )]
    ToleranceExceeded { reference: f64, computed: f64 },
}

#[derive(Debug, Error, PartialEq)]
#[error("scoring output line {index} ('{content}'): {reason}")]
pub struct ScoringParseError {
    pub index: usize,
    pub content: String,
    pub reason: SkipReason,
}

enum LineVerdict {
    Row(ScoreRow),
    Skip(SkipReason),
}

/// Parses the scoring routine's standard output into indexed
/// (reference, computed) rows.
///
/// Every non-blank line advances the position counter, whether or not it is
/// retained, so surviving rows stay aligned with the kept reaction list. In
/// strict mode the first malformed or out-of-tolerance line aborts the parse;
/// otherwise such lines are logged and skipped, leaving a gap.
pub fn parse_scoring_output(
    output: &str,
    strict: bool,
) -> Result<Vec<ScoreRow>, ScoringParseError> {
    let mut rows = Vec::new();
    let mut index = 0usize;

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let current = index;
        index += 1;

        match classify_line(line, current) {
            LineVerdict::Row(row) => rows.push(row),
            LineVerdict::Skip(reason) => {
                if strict {
                    return Err(ScoringParseError {
                        index: current,
                        content: line.to_string(),
                        reason,
                    });
                }
                warn!("Skipping scoring output line {}: {}", current, reason);
            }
        }
    }

    Ok(rows)
}

fn classify_line(line: &str, index: usize) -> LineVerdict {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return LineVerdict::Skip(SkipReason::TooFewTokens {
            found: tokens.len(),
        });
    }

    let reference = match tokens[REFERENCE_FIELD].parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            return LineVerdict::Skip(SkipReason::NotANumber {
                value: tokens[REFERENCE_FIELD].to_string(),
            });
        }
    };
    let computed = match tokens[COMPUTED_FIELD].parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            return LineVerdict::Skip(SkipReason::NotANumber {
                value: tokens[COMPUTED_FIELD].to_string(),
            });
        }
    };

    if (computed - reference).abs() > ENERGY_DIFF_TOLERANCE {
        return LineVerdict::Skip(SkipReason::ToleranceExceeded {
            reference,
            computed,
        });
    }

    LineVerdict::Row(ScoreRow {
        index,
        reference,
        computed,
    })
}
