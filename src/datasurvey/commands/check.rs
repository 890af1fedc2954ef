use crate::commands::helpers::{list_all_splits, load_manifests, summarize_split};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SurveyConfig;
use crate::error::Result;
use std::path::Path;

/// Reconciles manifests with directories without probing any file.
pub fn run(config: &SurveyConfig, data_root: &Path, max_files: Option<usize>) -> Result<CmdResult> {
    let manifests = load_manifests(config, data_root)?;
    let splits: Vec<_> = list_all_splits(config, data_root, max_files)?
        .iter()
        .map(|files| summarize_split(&manifests, files))
        .collect();

    let mut result = CmdResult::default().with_splits(splits);
    if result.has_mismatches() {
        result.add_message(CmdMessage::warning("Manifests and directories disagree."));
    } else {
        result.add_message(CmdMessage::success("Every directory matches its manifest."));
    }
    Ok(result)
}
