use crate::core::models::constraints::MoleculeConstraints;
use crate::core::models::molecule::Molecule;
use crate::core::progress::{Progress, ProgressReporter};
use crate::core::reactions::filter::{ReactionFilterError, filter_reaction_lines};
use crate::core::report::EvaluationRow;
use crate::core::scoring::backend::{ProcessError, ScoringBackend};
use crate::core::scoring::parser::{ScoringParseError, parse_scoring_output};
use crate::core::selection::composition::filter_by_composition;
use crate::core::stats::{ErrorSummary, summarize};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reaction file error: {0}")]
    ReactionFilter(#[from] ReactionFilterError),
    #[error("Scoring output error: {0}")]
    ScoringOutput(#[from] ScoringParseError),
    #[error("Scoring process failed: {0}")]
    Process(#[from] ProcessError),
}

#[derive(Debug, Clone)]
pub struct EvaluationOptions {
    /// Method identifier handed to the scoring routine.
    pub method: String,
    /// Numeric format code handed to the scoring routine.
    pub res_format: u32,
    /// Abort on the first malformed reaction or output line instead of
    /// skipping it.
    pub strict: bool,
    /// Reaction definition file to evaluate.
    pub res_file: PathBuf,
}

/// A kept reaction that received no scoring-output row; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedReaction {
    pub index: usize,
    pub species: Vec<String>,
    pub stoichiometry: Vec<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationReport {
    pub rows: Vec<EvaluationRow>,
    pub summary: ErrorSummary,
    /// Kept reactions whose position index never appeared in the parsed
    /// scoring output.
    pub unmatched: Vec<UnmatchedReaction>,
    pub molecules_selected: usize,
    pub reactions_kept: usize,
}

/// Runs one full evaluation pass.
///
/// Molecules are reduced to the constraint-satisfying subset, the reaction
/// file is restricted to reactions built entirely from those molecules, the
/// restricted file is written to `<res-file>_eval` and submitted to the
/// scoring backend, and the parsed output is merged back by position index
/// and summarized. A count mismatch between kept reactions and parsed rows
/// is reported in the returned value and logged, never raised.
pub fn run(
    molecules: &[Molecule],
    constraints: &MoleculeConstraints,
    backend: &dyn ScoringBackend,
    options: &EvaluationOptions,
    reporter: &ProgressReporter,
) -> Result<EvaluationReport, EvaluationError> {
    reporter.report(Progress::PhaseStart {
        name: "Selecting molecules",
    });
    let selected = filter_by_composition(molecules, constraints, reporter);
    let valid_species: HashSet<String> = selected
        .iter()
        .map(|molecule| molecule.name().to_string())
        .collect();
    info!(
        "{} of {} molecules satisfy the composition constraints.",
        selected.len(),
        molecules.len()
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Filtering reactions",
    });
    let res_lines = read_lines(&options.res_file)?;
    let filtered = filter_reaction_lines(&res_lines, &valid_species, options.strict)?;
    reporter.report(Progress::PhaseFinish);

    let mut report = EvaluationReport {
        molecules_selected: selected.len(),
        reactions_kept: filtered.entries.len(),
        ..EvaluationReport::default()
    };

    if filtered.entries.is_empty() {
        info!("No valid reactions found.");
        return Ok(report);
    }

    reporter.report(Progress::PhaseStart { name: "Scoring" });
    let eval_path = eval_file_path(&options.res_file);
    write_lines(&eval_path, &filtered.lines)?;
    let output = backend.submit(&eval_path, &options.method, options.res_format)?;
    let score_rows = parse_scoring_output(&output, options.strict)?;
    reporter.report(Progress::PhaseFinish);

    let scored_indices: HashSet<usize> = score_rows.iter().map(|row| row.index).collect();
    if score_rows.len() != filtered.entries.len() {
        warn!(
            "The formal number of reactions ({}) does not match the number of evaluated reactions ({}).",
            filtered.entries.len(),
            score_rows.len()
        );
        for (index, entry) in filtered.entries.iter().enumerate() {
            if !scored_indices.contains(&index) {
                warn!(
                    "Reaction '{:?}' with stoichiometry '{:?}' could not be parsed.",
                    entry.species, entry.stoichiometry
                );
                report.unmatched.push(UnmatchedReaction {
                    index,
                    species: entry.species.clone(),
                    stoichiometry: entry.stoichiometry.clone(),
                });
            }
        }
    }

    for score in &score_rows {
        // Rows beyond the kept reaction list would indicate surplus output
        // lines; they cannot be attributed to a reaction and are dropped.
        let Some(entry) = filtered.entries.get(score.index) else {
            warn!(
                "Scoring output row {} has no matching reaction entry.",
                score.index
            );
            continue;
        };
        report.rows.push(EvaluationRow {
            species: entry.species.clone(),
            stoichiometry: entry.stoichiometry.clone(),
            reference: score.reference,
            computed: score.computed,
        });
    }

    report.summary = summarize(&report.rows);
    Ok(report)
}

fn eval_file_path(res_file: &Path) -> PathBuf {
    let mut name = res_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str("_eval");
    res_file.with_file_name(name)
}

fn read_lines(path: &Path) -> Result<Vec<String>, std::io::Error> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::to_string)
        .collect())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), std::io::Error> {
    let mut file = fs::File::create(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
