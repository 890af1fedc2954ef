use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The single normalization rule shared by manifest ids and filename stems.
///
/// Every identifier comparison in the crate goes through this function, so a
/// manifest id and a file stem that differ only in surrounding whitespace
/// still match.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_string()
}

/// One manifest row: column name to cell value. The id cell is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRecord {
    id: String,
    fields: BTreeMap<String, String>,
}

impl ManifestRecord {
    pub fn new(id: String, fields: BTreeMap<String, String>) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub records: Vec<ManifestRecord>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(ManifestRecord::id)
    }

    /// File name used in report lines (`train.csv`).
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Ordered raster dimensions, e.g. channels, height, width.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Shape(pub Vec<u64>);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.0.iter().map(u64::to_string).collect();
        write!(f, "({})", dims.join(", "))
    }
}

impl From<Vec<u64>> for Shape {
    fn from(dims: Vec<u64>) -> Self {
        Shape(dims)
    }
}

/// Fields extracted from one line of diagnostic output. Absent means the
/// pattern did not match, which is expected and never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RasterFields {
    pub shape: Option<Shape>,
    pub height: Option<u64>,
    pub width: Option<u64>,
    pub bits_per_sample: Option<u64>,
}

impl RasterFields {
    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
            && self.height.is_none()
            && self.width.is_none()
            && self.bits_per_sample.is_none()
    }

    /// `shape=(1, 2) height=2 width=n/a bps=8`
    pub fn describe(&self) -> String {
        fn opt(v: Option<u64>) -> String {
            v.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
        }
        let shape = self
            .shape
            .as_ref()
            .map(Shape::to_string)
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "shape={} height={} width={} bps={}",
            shape,
            opt(self.height),
            opt(self.width),
            opt(self.bits_per_sample)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub name: String,
    pub raw: String,
    #[serde(flatten)]
    pub fields: RasterFields,
}

/// One of the three file collections a dataset is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    TrainImages,
    TrainLabels,
    TestImages,
}

impl Split {
    pub const ALL: [Split; 3] = [Split::TrainImages, Split::TrainLabels, Split::TestImages];

    pub fn key(&self) -> &'static str {
        match self {
            Split::TrainImages => "train_images",
            Split::TrainLabels => "train_labels",
            Split::TestImages => "test_images",
        }
    }

    /// Human label for the file collection.
    pub fn title(&self) -> &'static str {
        match self {
            Split::TrainImages => "Train images",
            Split::TrainLabels => "Train labels",
            Split::TestImages => "Test images",
        }
    }

    pub fn uses_test_manifest(&self) -> bool {
        matches!(self, Split::TestImages)
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
