use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch scoring process: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("scoring process exited with {status}: {stderr}")]
    NonZeroExit { status: String, stderr: String },
}

/// The external scoring routine behind a single-operation seam, so the
/// filter/parse/statistics pipeline can be exercised without a real
/// subprocess.
pub trait ScoringBackend {
    /// Runs the scoring routine over a filtered reaction file and returns its
    /// raw standard output.
    fn submit(
        &self,
        reaction_file: &Path,
        method: &str,
        res_format: u32,
    ) -> Result<String, ProcessError>;
}

/// Executes the reaction file as a shell script:
/// `bash <reaction_file> <method> <res_format>`.
///
/// The call is synchronous, without timeout or retry; a non-zero exit status
/// is always fatal to the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TmerScriptBackend;

impl TmerScriptBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ScoringBackend for TmerScriptBackend {
    fn submit(
        &self,
        reaction_file: &Path,
        method: &str,
        res_format: u32,
    ) -> Result<String, ProcessError> {
        info!(
            "Running scoring script '{}' for method '{}'.",
            reaction_file.display(),
            method
        );
        let output = Command::new("bash")
            .arg(reaction_file)
            .arg(method)
            .arg(res_format.to_string())
            .output()?;

        if !output.status.success() {
            return Err(ProcessError::NonZeroExit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!("Scoring script produced {} bytes of output.", output.stdout.len());
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_exit_error_carries_status_and_stderr() {
        let err = ProcessError::NonZeroExit {
            status: "exit status: 2".to_string(),
            stderr: "tmer2: no such method".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("exit status: 2"));
        assert!(rendered.contains("no such method"));
    }
}
