use crate::config::SurveyConfig;
use crate::model::FileMetadata;
use crate::report::SplitSummary;
use std::path::PathBuf;

pub mod check;
pub mod helpers;
pub mod probe;
pub mod report;

pub use report::ReportOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Rendered report text.
    pub report: Option<String>,
    pub report_path: Option<PathBuf>,
    pub splits: Vec<SplitSummary>,
    pub probed: Vec<FileMetadata>,
    pub config: Option<SurveyConfig>,
    pub config_source: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_report(mut self, text: String, path: PathBuf) -> Self {
        self.report = Some(text);
        self.report_path = Some(path);
        self
    }

    pub fn with_splits(mut self, splits: Vec<SplitSummary>) -> Self {
        self.splits = splits;
        self
    }

    pub fn with_probed(mut self, probed: Vec<FileMetadata>) -> Self {
        self.probed = probed;
        self
    }

    pub fn with_config(mut self, config: SurveyConfig, source: Option<PathBuf>) -> Self {
        self.config = Some(config);
        self.config_source = source;
        self
    }

    pub fn has_mismatches(&self) -> bool {
        self.splits.iter().any(|s| !s.reconciliation.is_exact())
    }
}
