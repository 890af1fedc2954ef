use crate::error::{Result, SurveyError};
use crate::model::Split;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Dataset root used when none is given on the command line.
pub const DEFAULT_DATA_ROOT: &str = "data/raw/vesuvius-challenge-surface-detection";
/// Report destination used when none is given on the command line.
pub const DEFAULT_REPORT_PATH: &str = "analysis/readme.md";

/// File and directory names inside a dataset root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetLayout {
    pub train_manifest: String,
    pub test_manifest: String,
    pub train_images: String,
    pub train_labels: String,
    pub test_images: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            train_manifest: "train.csv".to_string(),
            test_manifest: "test.csv".to_string(),
            train_images: "train_images".to_string(),
            train_labels: "train_labels".to_string(),
            test_images: "test_images".to_string(),
        }
    }
}

impl DatasetLayout {
    pub fn split_dir(&self, root: &Path, split: Split) -> PathBuf {
        let name = match split {
            Split::TrainImages => &self.train_images,
            Split::TrainLabels => &self.train_labels,
            Split::TestImages => &self.test_images,
        };
        root.join(name)
    }

    pub fn train_manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.train_manifest)
    }

    pub fn test_manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.test_manifest)
    }
}

/// External tool invoked once per file as `<program> <args...> <file>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProbeConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: "file".to_string(),
            args: Vec::new(),
        }
    }
}

/// Configuration for a survey run, stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SurveyConfig {
    pub layout: DatasetLayout,
    /// Manifest column holding the identifier matched against file stems.
    pub id_column: String,
    /// Image file extension, without the leading dot.
    pub extension: String,
    pub probe: ProbeConfig,
    /// Probed files per collection shown as inspection examples.
    pub sample_size: usize,
    /// Shapes listed per histogram.
    pub top_shapes: usize,
    /// Identifiers quoted per missing/extra summary.
    pub example_ids: usize,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            layout: DatasetLayout::default(),
            id_column: "id".to_string(),
            extension: "tif".to_string(),
            probe: ProbeConfig::default(),
            sample_size: 5,
            top_shapes: 5,
            example_ids: 5,
        }
    }
}

impl SurveyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&config_path)
    }

    /// Load config from an explicit file, which must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SurveyError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config: SurveyConfig = serde_json::from_str(&content)?;
        let ext = config.extension.clone();
        config.set_extension(&ext);
        Ok(config)
    }

    /// Platform config directory, e.g. `~/.config/datasurvey`.
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "datasurvey", "datasurvey").map(|d| d.config_dir().to_path_buf())
    }

    /// An explicit file wins; otherwise the platform config file if present,
    /// otherwise defaults. Returns the file the config came from, if any.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        Self::resolve_in(explicit, Self::default_dir().as_deref())
    }

    fn resolve_in(
        explicit: Option<&Path>,
        config_dir: Option<&Path>,
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }
        match config_dir {
            Some(dir) => {
                let path = dir.join(CONFIG_FILENAME);
                let source = path.exists().then_some(path);
                Ok((Self::load(dir)?, source))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Set the image extension (normalizes away a leading dot)
    pub fn set_extension(&mut self, ext: &str) {
        self.extension = ext.trim_start_matches('.').to_string();
    }
}
