//! # Report Rendering
//!
//! [`DatasetSummary`] holds everything a report shows. Rendering goes through a
//! Minijinja template (`templates/report.md.tmp`): layout strings such as shape
//! tuples, capped id examples and `n/a` placeholders are computed here, the
//! template only arranges lines.

use crate::error::{Result, SurveyError};
use crate::model::{FileMetadata, Split};
use crate::reconcile::Reconciliation;
use crate::shapes::ShapeHistogram;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_TEMPLATE: &str = include_str!("templates/report.md.tmp");
pub const REPORT_TITLE: &str = "Dataset exploration report";

const MISSING_VALUE: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub name: String,
    pub rows: usize,
}

/// One file collection after listing, truncation and reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    pub split: Split,
    /// Files kept after `max_files` truncation.
    pub files: usize,
    /// Files found before truncation.
    pub total: usize,
    #[serde(flatten)]
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Clone)]
pub struct ShapeSummary {
    pub split: Split,
    pub histogram: ShapeHistogram,
}

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub data_root: PathBuf,
    pub manifests: Vec<ManifestSummary>,
    pub splits: Vec<SplitSummary>,
    pub max_files: Option<usize>,
    pub shapes: Vec<ShapeSummary>,
    pub samples: Vec<FileMetadata>,
    pub probe_program: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub top_shapes: usize,
    pub example_ids: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top_shapes: 5,
            example_ids: 5,
        }
    }
}

#[derive(Serialize)]
struct ReportView {
    title: &'static str,
    data_root: String,
    manifests: Vec<String>,
    files: Vec<String>,
    sampled: bool,
    max_files: usize,
    splits: Vec<SplitView>,
    shapes: Vec<ShapeView>,
    top: usize,
    probe_program: String,
    samples: Vec<SampleView>,
}

#[derive(Serialize)]
struct SplitView {
    title: &'static str,
    exact: bool,
    missing_count: usize,
    missing_examples: String,
    extra_count: usize,
    extra_examples: String,
}

#[derive(Serialize)]
struct ShapeView {
    title: &'static str,
    unique: usize,
    top: Vec<String>,
}

#[derive(Serialize)]
struct SampleView {
    name: String,
    shape: String,
    height: String,
    width: String,
    bps: String,
}

impl DatasetSummary {
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("report.md", REPORT_TEMPLATE)?;

        let mut text = env.get_template("report.md")?.render(self.view(options))?;
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }

    fn view(&self, options: &RenderOptions) -> ReportView {
        ReportView {
            title: REPORT_TITLE,
            data_root: self.data_root.display().to_string(),
            manifests: self
                .manifests
                .iter()
                .map(|m| format!("{}: {} rows", m.name, m.rows))
                .collect(),
            files: self.splits.iter().map(files_entry).collect(),
            sampled: self.max_files.is_some(),
            max_files: self.max_files.unwrap_or_default(),
            splits: self
                .splits
                .iter()
                .map(|s| split_view(s, options.example_ids))
                .collect(),
            shapes: self
                .shapes
                .iter()
                .map(|s| shape_view(s, options.top_shapes))
                .collect(),
            top: options.top_shapes,
            probe_program: self.probe_program.clone(),
            samples: self.samples.iter().map(sample_view).collect(),
        }
    }
}

fn files_entry(split: &SplitSummary) -> String {
    if split.files == split.total {
        format!("{}={}", split.split.key(), split.files)
    } else {
        format!("{}={} (of {})", split.split.key(), split.files, split.total)
    }
}

fn split_view(split: &SplitSummary, examples: usize) -> SplitView {
    let r = &split.reconciliation;
    SplitView {
        title: split.split.title(),
        exact: r.is_exact(),
        missing_count: r.missing.len(),
        missing_examples: example_suffix(&r.missing, examples),
        extra_count: r.extra.len(),
        extra_examples: example_suffix(&r.extra, examples),
    }
}

/// ` (e.g. 001, 002)`, empty when no examples are shown.
fn example_suffix(ids: &[String], examples: usize) -> String {
    let shown: Vec<&str> = ids.iter().take(examples).map(String::as_str).collect();
    if shown.is_empty() {
        String::new()
    } else {
        format!(" (e.g. {})", shown.join(", "))
    }
}

fn shape_view(shapes: &ShapeSummary, top: usize) -> ShapeView {
    ShapeView {
        title: shapes_title(shapes.split),
        unique: shapes.histogram.unique(),
        top: shapes
            .histogram
            .most_common(top)
            .into_iter()
            .map(|(key, count)| format!("{}: {}", key, count))
            .collect(),
    }
}

fn shapes_title(split: Split) -> &'static str {
    match split {
        Split::TrainImages => "Train image shapes",
        Split::TrainLabels => "Train label shapes",
        Split::TestImages => "Test image shapes",
    }
}

fn sample_view(meta: &FileMetadata) -> SampleView {
    let f = &meta.fields;
    SampleView {
        name: meta.name.clone(),
        shape: f
            .shape
            .as_ref()
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        height: or_missing(f.height),
        width: or_missing(f.width),
        bps: or_missing(f.bits_per_sample),
    }
}

fn or_missing(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Writes the report, creating parent directories as needed.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| SurveyError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(path, text).map_err(|e| SurveyError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
