//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! operation, whatever the front end.
//!
//! The API dispatches to `commands/*.rs` and returns `Result<CmdResult>`. It
//! holds no business logic and does no terminal I/O.
//!
//! `SurveyApi<P: MetadataProbe>` is generic over the probe backend:
//! - Production: `SurveyApi<CommandProbe>`
//! - Testing: `SurveyApi<CannedProbe>`

use crate::commands::{self, CmdResult, ReportOptions};
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::probe::command::CommandProbe;
use crate::probe::MetadataProbe;
use std::path::{Path, PathBuf};

pub struct SurveyApi<P: MetadataProbe> {
    probe: P,
    config: SurveyConfig,
    config_source: Option<PathBuf>,
}

impl SurveyApi<CommandProbe> {
    /// Uses the probe command named in `config`.
    pub fn from_config(config: SurveyConfig) -> Self {
        let probe = CommandProbe::from_config(&config.probe);
        Self::new(probe, config)
    }
}

impl<P: MetadataProbe> SurveyApi<P> {
    pub fn new(probe: P, config: SurveyConfig) -> Self {
        Self {
            probe,
            config,
            config_source: None,
        }
    }

    pub fn with_config_source(mut self, source: Option<PathBuf>) -> Self {
        self.config_source = source;
        self
    }

    pub fn report(&self, options: &ReportOptions) -> Result<CmdResult> {
        commands::report::run(&self.probe, &self.config, options)
    }

    pub fn check(&self, data_root: &Path, max_files: Option<usize>) -> Result<CmdResult> {
        commands::check::run(&self.config, data_root, max_files)
    }

    pub fn probe_files(&self, paths: &[PathBuf]) -> Result<CmdResult> {
        commands::probe::run(&self.probe, paths)
    }

    pub fn show_config(&self) -> CmdResult {
        CmdResult::default().with_config(self.config.clone(), self.config_source.clone())
    }

    pub fn config(&self) -> &SurveyConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

pub use crate::commands::{CmdMessage, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures;
    use crate::probe::memory::CannedProbe;
    use tempfile::TempDir;

    #[test]
    fn check_never_probes() {
        let dir = TempDir::new().unwrap();
        fixtures::dataset(dir.path(), &["1"], &["2"], &["1"], &["1"], &["2"]);
        let api = SurveyApi::new(CannedProbe::new(), SurveyConfig::default());

        let result = api.check(dir.path(), None).unwrap();
        assert_eq!(result.splits.len(), 3);
        assert_eq!(api.probe().call_count(), 0);
    }

    #[test]
    fn report_dispatches_with_configured_probe() {
        let dir = TempDir::new().unwrap();
        fixtures::dataset(dir.path(), &["1"], &[], &["1"], &[], &[]);
        let api = SurveyApi::new(
            CannedProbe::new().with_fallback("bps=8"),
            SurveyConfig::default(),
        );

        let result = api
            .report(&ReportOptions {
                data_root: dir.path().to_path_buf(),
                report_path: dir.path().join("r.md"),
                max_files: None,
            })
            .unwrap();
        assert!(result.report.is_some());
        assert_eq!(api.probe().call_count(), 1);
    }

    #[test]
    fn show_config_carries_source() {
        let api = SurveyApi::new(CannedProbe::new(), SurveyConfig::default())
            .with_config_source(Some(PathBuf::from("/etc/survey.json")));
        let result = api.show_config();
        assert_eq!(result.config, Some(SurveyConfig::default()));
        assert_eq!(result.config_source, Some(PathBuf::from("/etc/survey.json")));
    }

    #[test]
    fn from_config_uses_configured_program() {
        let mut config = SurveyConfig::default();
        config.probe.program = "tiffinfo".into();
        let api = SurveyApi::from_config(config);
        assert_eq!(api.probe().program(), "tiffinfo");
    }
}
