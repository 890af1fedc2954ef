use crate::config::SurveyConfig;
use crate::error::Result;
use crate::listing::{list_files, ListedFile};
use crate::manifest::read_manifest;
use crate::model::{Manifest, Split};
use crate::reconcile::reconcile;
use crate::report::{ManifestSummary, SplitSummary};
use std::path::Path;
use tracing::warn;

pub struct Manifests {
    pub train: Manifest,
    pub test: Manifest,
}

impl Manifests {
    pub fn for_split(&self, split: Split) -> &Manifest {
        if split.uses_test_manifest() {
            &self.test
        } else {
            &self.train
        }
    }

    pub fn summaries(&self) -> Vec<ManifestSummary> {
        [&self.train, &self.test]
            .into_iter()
            .map(|m| ManifestSummary {
                name: m.display_name(),
                rows: m.len(),
            })
            .collect()
    }
}

/// The files of one split, sorted by id and possibly truncated.
pub struct SplitFiles {
    pub split: Split,
    pub files: Vec<ListedFile>,
    /// Count before truncation.
    pub total: usize,
}

impl SplitFiles {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.id.as_str())
    }
}

pub fn load_manifests(config: &SurveyConfig, root: &Path) -> Result<Manifests> {
    let train = read_manifest(&config.layout.train_manifest_path(root), &config.id_column)?;
    let test = read_manifest(&config.layout.test_manifest_path(root), &config.id_column)?;
    Ok(Manifests { train, test })
}

/// Lists a split directory; sorting happens before truncation so the kept
/// subset does not depend on filesystem enumeration order.
pub fn list_split(
    config: &SurveyConfig,
    root: &Path,
    split: Split,
    max_files: Option<usize>,
) -> Result<SplitFiles> {
    let mut files = list_files(&config.layout.split_dir(root, split), &config.extension)?;
    let total = files.len();
    if let Some(max) = max_files {
        if total > max {
            warn!(split = %split, total, kept = max, "truncating file list");
            files.truncate(max);
        }
    }
    Ok(SplitFiles {
        split,
        files,
        total,
    })
}

pub fn list_all_splits(
    config: &SurveyConfig,
    root: &Path,
    max_files: Option<usize>,
) -> Result<Vec<SplitFiles>> {
    Split::ALL
        .iter()
        .map(|split| list_split(config, root, *split, max_files))
        .collect()
}

pub fn summarize_split(manifests: &Manifests, files: &SplitFiles) -> SplitSummary {
    SplitSummary {
        split: files.split,
        files: files.files.len(),
        total: files.total,
        reconciliation: reconcile(manifests.for_split(files.split).ids(), files.ids()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sorts_before_truncating() {
        let dir = TempDir::new().unwrap();
        fixtures::dataset(dir.path(), &[], &[], &["05", "01", "04", "02", "03"], &[], &[]);

        let files = list_split(&SurveyConfig::default(), dir.path(), Split::TrainImages, Some(2))
            .unwrap();
        assert_eq!(files.ids().collect::<Vec<_>>(), vec!["01", "02"]);
        assert_eq!(files.total, 5);
    }

    #[test]
    fn test_split_uses_test_manifest() {
        let dir = TempDir::new().unwrap();
        fixtures::dataset(dir.path(), &["1"], &["7"], &["1"], &["1"], &["7", "8"]);

        let config = SurveyConfig::default();
        let manifests = load_manifests(&config, dir.path()).unwrap();
        let files = list_split(&config, dir.path(), Split::TestImages, None).unwrap();
        let summary = summarize_split(&manifests, &files);

        assert!(summary.reconciliation.missing.is_empty());
        assert_eq!(summary.reconciliation.extra, vec!["8"]);
        assert_eq!(summary.files, 2);
    }

    #[test]
    fn manifest_summaries_name_both_files() {
        let dir = TempDir::new().unwrap();
        fixtures::dataset(dir.path(), &["1", "2"], &["3"], &[], &[], &[]);

        let manifests = load_manifests(&SurveyConfig::default(), dir.path()).unwrap();
        let summaries = manifests.summaries();
        assert_eq!(summaries[0].name, "train.csv");
        assert_eq!(summaries[0].rows, 2);
        assert_eq!(summaries[1].rows, 1);
    }
}
