use crate::error::Result;
use crate::model::{FileMetadata, Shape};
use crate::probe::MetadataProbe;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A histogram bucket: a known shape, or files whose shape could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKey {
    Known(Shape),
    Unknown,
}

impl From<Option<&Shape>> for ShapeKey {
    fn from(shape: Option<&Shape>) -> Self {
        match shape {
            Some(s) => ShapeKey::Known(s.clone()),
            None => ShapeKey::Unknown,
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKey::Known(shape) => write!(f, "{shape}"),
            ShapeKey::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeHistogram {
    counts: HashMap<ShapeKey, usize>,
}

impl ShapeHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, shape: Option<&Shape>) {
        *self.counts.entry(ShapeKey::from(shape)).or_insert(0) += 1;
    }

    pub fn count(&self, key: &ShapeKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct buckets, `unknown` included.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent buckets. Ties order by shape, `unknown` last.
    pub fn most_common(&self, n: usize) -> Vec<(&ShapeKey, usize)> {
        let mut entries: Vec<(&ShapeKey, usize)> =
            self.counts.iter().map(|(k, v)| (k, *v)).collect();
        entries.sort_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)));
        entries.truncate(n);
        entries
    }
}

/// Histogram plus the metadata of every probed file, in probe order.
#[derive(Debug, Clone, Default)]
pub struct ShapeSurvey {
    pub histogram: ShapeHistogram,
    pub files: Vec<FileMetadata>,
}

/// Probes each path once and tallies its shape.
pub fn survey_shapes<P, I>(probe: &P, paths: I) -> Result<ShapeSurvey>
where
    P: MetadataProbe + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let mut survey = ShapeSurvey::default();
    for path in paths {
        let meta = probe.probe(path.as_ref())?;
        survey.histogram.record(meta.fields.shape.as_ref());
        survey.files.push(meta);
    }
    debug!(
        files = survey.files.len(),
        unique = survey.histogram.unique(),
        "surveyed shapes"
    );
    Ok(survey)
}

pub fn aggregate_shapes<P, I>(probe: &P, paths: I) -> Result<ShapeHistogram>
where
    P: MetadataProbe + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    Ok(survey_shapes(probe, paths)?.histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::memory::CannedProbe;

    fn known(dims: &[u64]) -> ShapeKey {
        ShapeKey::Known(Shape(dims.to_vec()))
    }

    #[test]
    fn tallies_probed_shapes() {
        let probe = CannedProbe::new()
            .with_output("a.tif", r#"shape": [3, 512, 512]"#)
            .with_output("b.tif", r#"shape": [3, 512, 512]"#)
            .with_output("c.tif", r#"shape": [1, 256, 256]"#);

        let histogram = aggregate_shapes(&probe, ["a.tif", "b.tif", "c.tif"]).unwrap();
        assert_eq!(histogram.count(&known(&[3, 512, 512])), 2);
        assert_eq!(histogram.count(&known(&[1, 256, 256])), 1);
        assert_eq!(histogram.unique(), 2);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn files_without_shape_land_in_unknown() {
        let probe = CannedProbe::new().with_fallback("height=4");

        let histogram = aggregate_shapes(&probe, ["a.tif", "b.tif"]).unwrap();
        assert_eq!(histogram.count(&ShapeKey::Unknown), 2);
        assert_eq!(ShapeKey::Unknown.to_string(), "unknown");
    }

    #[test]
    fn most_common_orders_by_count_then_shape() {
        let mut histogram = ShapeHistogram::new();
        histogram.record(None);
        histogram.record(Some(&Shape(vec![2, 2])));
        histogram.record(Some(&Shape(vec![1, 1])));
        histogram.record(Some(&Shape(vec![9])));
        histogram.record(Some(&Shape(vec![9])));

        let top: Vec<(String, usize)> = histogram
            .most_common(3)
            .into_iter()
            .map(|(k, c)| (k.to_string(), c))
            .collect();
        assert_eq!(
            top,
            vec![
                ("(9)".to_string(), 2),
                ("(1, 1)".to_string(), 1),
                ("(2, 2)".to_string(), 1),
            ]
        );
    }

    #[test]
    fn survey_keeps_metadata_in_probe_order() {
        let probe = CannedProbe::new().with_fallback("bps=8");
        let survey = survey_shapes(&probe, ["2.tif", "1.tif"]).unwrap();

        let names: Vec<_> = survey.files.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["2.tif", "1.tif"]);
        assert_eq!(probe.call_count(), 2);
    }

    #[test]
    fn probe_failure_aborts_the_survey() {
        let probe = CannedProbe::new().with_output("a.tif", "bps=8");
        assert!(aggregate_shapes(&probe, ["a.tif", "b.tif"]).is_err());
    }
}
