use bencheval::core::io::discovery::DiscoveryError;
use bencheval::core::models::constraints::ConstraintError;
use bencheval::core::report::ReportError;
use bencheval::core::selection::elements::SelectionError;
use bencheval::workflows::evaluate::EvaluationError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid element selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("Invalid molecule constraints: {0}")]
    Constraints(#[from] ConstraintError),

    #[error("Failed to write report: {0}")]
    Report(#[from] ReportError),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
