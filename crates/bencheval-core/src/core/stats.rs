use crate::core::report::EvaluationRow;

/// Summary error statistics over a set of evaluated reactions.
///
/// With no rows every derived statistic is `f64::NAN`; with a single row the
/// sample standard deviation is `f64::NAN`. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub n: usize,
    pub mean_abs_ref: f64,
    pub mae: f64,
    pub mse: f64,
    pub stddev: f64,
    pub rmsd: f64,
    pub max: f64,
    pub min: f64,
    pub range: f64,
}

impl Default for ErrorSummary {
    /// The empty summary: zero rows, every derived statistic undefined.
    fn default() -> Self {
        summarize(&[])
    }
}

/// Reduces evaluated rows to summary statistics; the per-row signed error is
/// computed minus reference.
pub fn summarize(rows: &[EvaluationRow]) -> ErrorSummary {
    let n = rows.len();
    if n == 0 {
        return ErrorSummary {
            n,
            mean_abs_ref: f64::NAN,
            mae: f64::NAN,
            mse: f64::NAN,
            stddev: f64::NAN,
            rmsd: f64::NAN,
            max: f64::NAN,
            min: f64::NAN,
            range: f64::NAN,
        };
    }

    let count = n as f64;
    let errors: Vec<f64> = rows.iter().map(EvaluationRow::signed_error).collect();

    let mean_abs_ref = rows.iter().map(|row| row.reference.abs()).sum::<f64>() / count;
    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / count;
    let mse = errors.iter().sum::<f64>() / count;
    let rmsd = (errors.iter().map(|e| e * e).sum::<f64>() / count).sqrt();

    let stddev = if n > 1 {
        let variance =
            errors.iter().map(|e| (e - mse) * (e - mse)).sum::<f64>() / (count - 1.0);
        variance.sqrt()
    } else {
        f64::NAN
    };

    let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = errors.iter().copied().fold(f64::INFINITY, f64::min);

    ErrorSummary {
        n,
        mean_abs_ref,
        mae,
        mse,
        stddev,
        rmsd,
        max,
        min,
        range: max - min,
    }
}
