use crate::error::{Result, SurveyError};
use crate::model::normalize_id;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFile {
    pub id: String,
    pub path: PathBuf,
}

/// Identifier of a file: its normalized stem.
pub fn file_id(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| normalize_id(&stem.to_string_lossy()))
}

/// Lists regular files in `dir` whose extension is `extension`, sorted by id.
///
/// The extension match is case-sensitive; a leading dot in `extension` is
/// ignored. Hidden files (names starting with `.`) are skipped, as a shell
/// glob would.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<ListedFile>> {
    let extension = extension.trim_start_matches('.');
    let entries = fs::read_dir(dir).map_err(|e| SurveyError::read(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SurveyError::read(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(id) = file_id(&path) {
            files.push(ListedFile { id, path });
        }
    }

    files.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.path.cmp(&b.path)));
    debug!(dir = %dir.display(), count = files.len(), "listed files");
    Ok(files)
}

pub fn list_ids(dir: &Path, extension: &str) -> Result<Vec<String>> {
    Ok(list_files(dir, extension)?
        .into_iter()
        .map(|f| f.id)
        .collect())
}
