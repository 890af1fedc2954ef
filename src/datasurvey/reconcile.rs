use crate::model::normalize_id;
use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of comparing expected (manifest) ids with observed (on disk) ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// In the manifest but not on disk.
    pub missing: Vec<String>,
    /// On disk but not in the manifest.
    pub extra: Vec<String>,
}

impl Reconciliation {
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Set difference in both directions; both outputs sorted and de-duplicated.
///
/// Both sides go through [`normalize_id`] so they are compared under the same
/// rule regardless of where they came from.
pub fn reconcile<E, O>(expected: E, observed: O) -> Reconciliation
where
    E: IntoIterator,
    E::Item: AsRef<str>,
    O: IntoIterator,
    O::Item: AsRef<str>,
{
    let expected: BTreeSet<String> = expected
        .into_iter()
        .map(|id| normalize_id(id.as_ref()))
        .collect();
    let observed: BTreeSet<String> = observed
        .into_iter()
        .map(|id| normalize_id(id.as_ref()))
        .collect();

    Reconciliation {
        missing: expected.difference(&observed).cloned().collect(),
        extra: observed.difference(&expected).cloned().collect(),
    }
}
