use super::{metadata_from_output, MetadataProbe};
use crate::error::{Result, SurveyError};
use crate::model::{display_name, FileMetadata};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Probe backed by canned diagnostic lines keyed by file name.
///
/// Every call is recorded so tests can assert how many files were probed.
#[derive(Default)]
pub struct CannedProbe {
    outputs: HashMap<String, String>,
    fallback: Option<String>,
    calls: RefCell<Vec<PathBuf>>,
}

impl CannedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, file_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.outputs.insert(file_name.into(), text.into());
        self
    }

    /// Text returned for files without their own canned output.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl MetadataProbe for CannedProbe {
    fn probe(&self, path: &Path) -> Result<FileMetadata> {
        self.calls.borrow_mut().push(path.to_path_buf());
        let text = self
            .outputs
            .get(&display_name(path))
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| SurveyError::ProbeFailed {
                path: path.to_path_buf(),
                status: "no canned output".to_string(),
                stderr: String::new(),
            })?;
        Ok(metadata_from_output(path, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_output_by_file_name() {
        let probe = CannedProbe::new()
            .with_output("1.tif", "height=10")
            .with_fallback("bps=8");

        let one = probe.probe(Path::new("/a/1.tif")).unwrap();
        let two = probe.probe(Path::new("/a/2.tif")).unwrap();
        assert_eq!(one.fields.height, Some(10));
        assert_eq!(two.fields.bits_per_sample, Some(8));
        assert_eq!(probe.call_count(), 2);
    }

    #[test]
    fn unknown_file_without_fallback_fails() {
        let probe = CannedProbe::new();
        assert!(probe.probe(Path::new("x.tif")).is_err());
        assert_eq!(probe.calls(), vec![PathBuf::from("x.tif")]);
    }
}
