use crate::core::stats::ErrorSummary;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One fully evaluated reaction: the species and stoichiometry of the kept
/// reaction entry merged with the reference and computed energies of its
/// scoring-output row.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    pub species: Vec<String>,
    pub stoichiometry: Vec<i32>,
    pub reference: f64,
    pub computed: f64,
}

impl EvaluationRow {
    pub fn signed_error(&self) -> f64 {
        self.computed - self.reference
    }

    fn species_cell(&self) -> String {
        self.species.join(" ")
    }

    fn stoichiometry_cell(&self) -> String {
        self.stoichiometry
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Writes the per-reaction detail table
/// (Reaction, Stoichiometry, ReferenceValue, MethodValue).
pub fn write_results_csv(path: &Path, rows: &[EvaluationRow]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Reaction", "Stoichiometry", "ReferenceValue", "MethodValue"])?;
    for row in rows {
        writer.write_record([
            row.species_cell(),
            row.stoichiometry_cell(),
            format!("{:.6}", row.reference),
            format!("{:.6}", row.computed),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    #[serde(rename = "Method")]
    method: &'a str,
    #[serde(rename = "N")]
    n: usize,
    #[serde(rename = "MeanAbsRef")]
    mean_abs_ref: f64,
    #[serde(rename = "MAE")]
    mae: f64,
    #[serde(rename = "MSE")]
    mse: f64,
    #[serde(rename = "STDDEV")]
    stddev: f64,
    #[serde(rename = "RMSD")]
    rmsd: f64,
    #[serde(rename = "MAX")]
    max: f64,
    #[serde(rename = "MIN")]
    min: f64,
    #[serde(rename = "ErrRange")]
    range: f64,
}

/// Writes the one-row summary-statistics table for a method.
pub fn write_summary_csv(
    path: &Path,
    method: &str,
    summary: &ErrorSummary,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(SummaryRecord {
        method,
        n: summary.n,
        mean_abs_ref: summary.mean_abs_ref,
        mae: summary.mae,
        mse: summary.mse,
        stddev: summary.stddev,
        rmsd: summary.rmsd,
        max: summary.max,
        min: summary.min,
        range: summary.range,
    })?;
    writer.flush()?;
    Ok(())
}
