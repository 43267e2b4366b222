//! Fatal error conditions of the plotting pipeline
//!
//! Every variant here aborts the whole run. The binary maps each one to a
//! distinct process exit code through [`H2imError::exit_code`], so callers
//! that wrap these errors in `anyhow` should keep the original value in the
//! chain (use `.context(..)`, not `.map_err(|e| anyhow!(..))`).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum H2imError {
    /// `sensitivity.config` does not exist
    #[error("sensitivity configuration not found at {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The simulation was run without a sensitivity analysis
    #[error("no sensitivity analysis was run (type: {0})")]
    SensitivityDisabled(String),

    /// Malformed sensitivity configuration
    #[error("invalid sensitivity configuration: {0}")]
    InvalidConfig(String),

    /// A (configuration, run) pair lacks one of the expected result files
    #[error("missing result file {}", .0.display())]
    MissingResultFile(PathBuf),

    /// No `Sensitivity_<id>/Run_<id>` tree under the results root
    #[error("no result directories found under {}", .0.display())]
    MissingResultTree(PathBuf),

    #[error("output directory {} does not exist", .0.display())]
    MissingOutputDir(PathBuf),

    /// A result file is readable but lacks its key columns
    #[error("invalid result table {}: {reason}", path.display())]
    InvalidTable { path: PathBuf, reason: String },

    /// Strict labeling found a swept parameter without a legend symbol
    #[error("no legend symbol known for parameter '{0}'")]
    UnknownParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type H2imResult<T> = Result<T, H2imError>;

impl H2imError {
    /// Process exit code reported by the `h2im` binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            H2imError::ConfigNotFound(_) => 10,
            H2imError::SensitivityDisabled(_) => 11,
            H2imError::MissingResultFile(_) => 12,
            H2imError::MissingResultTree(_) => 13,
            H2imError::MissingOutputDir(_) => 14,
            H2imError::InvalidConfig(_) => 15,
            H2imError::InvalidTable { .. } | H2imError::UnknownParameter(_) | H2imError::Io(_) => 1,
        }
    }
}

/// Exit code for an arbitrary error chain; `1` unless an [`H2imError`] is in it.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<H2imError>())
        .map_or(1, H2imError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn fatal_conditions_have_distinct_codes() {
        let codes = [
            H2imError::ConfigNotFound("x".into()).exit_code(),
            H2imError::SensitivityDisabled("none".into()).exit_code(),
            H2imError::MissingResultFile("x".into()).exit_code(),
            H2imError::MissingResultTree("x".into()).exit_code(),
            H2imError::MissingOutputDir("x".into()).exit_code(),
            H2imError::InvalidConfig("x".into()).exit_code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
        assert!(codes.iter().all(|code| *code != 0 && *code != 1));
    }

    #[test]
    fn exit_code_survives_context() {
        let result: anyhow::Result<()> = Err(H2imError::MissingResultTree("results".into()))
            .context("discovering layout");
        let err = result.unwrap_err();
        assert_eq!(exit_code_for(&err), 13);
    }

    #[test]
    fn unrelated_errors_map_to_one() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: H2imError = io_err.into();
        assert!(matches!(err, H2imError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
