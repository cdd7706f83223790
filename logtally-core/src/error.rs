use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors. Everything content-level (unmatched lines, bad timestamps,
/// missing dot-paths, non-numeric aggregate values) is recovered locally in
/// the pipeline and never surfaces here.
#[derive(Debug, Error)]
pub enum TallyError {
    // Input
    #[error("failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },

    // Format specification
    #[error("format specification is empty")]
    EmptyFormat,

    #[error("invalid format specification '{spec}': {reason}")]
    BadFormat { spec: String, reason: String },
}

impl TallyError {
    pub fn read_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadInput {
            path: path.into(),
            source,
        }
    }

    pub fn bad_format(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BadFormat {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
