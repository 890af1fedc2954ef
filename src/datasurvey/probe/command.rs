use super::{metadata_from_output, MetadataProbe};
use crate::config::ProbeConfig;
use crate::error::{Result, SurveyError};
use crate::model::FileMetadata;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Runs `<program> <args...> <path>` and parses its standard output.
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(config.program.clone()).with_args(config.args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl MetadataProbe for CommandProbe {
    fn probe(&self, path: &Path) -> Result<FileMetadata> {
        debug!(program = %self.program, path = %path.display(), "probing");
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| SurveyError::ProbeSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SurveyError::ProbeFailed {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(metadata_from_output(path, single_line(&output.stdout)))
    }
}

fn single_line(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
