use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Manifest {} has no `{column}` column", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Probe command `{program}` could not be started: {source}")]
    ProbeSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Probe of {} failed ({status}): {stderr}", .path.display())]
    ProbeFailed {
        path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Coarse classification used by callers that only care about where a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A manifest or directory was missing or malformed.
    Read,
    /// The external metadata tool was missing or failed.
    Probe,
    Other,
}

impl SurveyError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SurveyError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::Read { .. }
            | SurveyError::Manifest { .. }
            | SurveyError::MissingColumn { .. } => ErrorKind::Read,
            SurveyError::ProbeSpawn { .. } | SurveyError::ProbeFailed { .. } => ErrorKind::Probe,
            _ => ErrorKind::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
