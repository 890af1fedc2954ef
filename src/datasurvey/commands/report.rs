use crate::commands::helpers::{list_all_splits, load_manifests, summarize_split};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::model::Split;
use crate::probe::MetadataProbe;
use crate::report::{write_report, DatasetSummary, RenderOptions, ShapeSummary};
use crate::shapes::survey_shapes;
use std::path::PathBuf;
use tracing::info;

/// Splits whose files are probed for shapes, in report order.
const PROBED_SPLITS: [Split; 2] = [Split::TrainImages, Split::TrainLabels];

/// Where to read the dataset from and where to write the report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub data_root: PathBuf,
    pub report_path: PathBuf,
    /// Keep only the first N files (by id) of each directory.
    pub max_files: Option<usize>,
}

/// Gathers everything the report shows, without rendering or writing it.
pub fn collect<P: MetadataProbe + ?Sized>(
    probe: &P,
    config: &SurveyConfig,
    options: &ReportOptions,
) -> Result<DatasetSummary> {
    let root = &options.data_root;
    info!(root = %root.display(), "loading manifests");
    let manifests = load_manifests(config, root)?;
    let listed = list_all_splits(config, root, options.max_files)?;
    let splits = listed
        .iter()
        .map(|files| summarize_split(&manifests, files))
        .collect();

    let mut shapes = Vec::new();
    let mut samples = Vec::new();
    for files in listed.iter().filter(|f| PROBED_SPLITS.contains(&f.split)) {
        let split = files.split;
        info!(split = %split, files = files.files.len(), "probing");
        let survey = survey_shapes(probe, files.files.iter().map(|f| &f.path))?;
        samples.extend(survey.files.into_iter().take(config.sample_size));
        shapes.push(ShapeSummary {
            split,
            histogram: survey.histogram,
        });
    }

    Ok(DatasetSummary {
        data_root: root.clone(),
        manifests: manifests.summaries(),
        splits,
        max_files: options.max_files,
        shapes,
        samples,
        probe_program: config.probe.program.clone(),
    })
}

/// Builds the report, writes it to `options.report_path` and returns its text.
pub fn run<P: MetadataProbe + ?Sized>(
    probe: &P,
    config: &SurveyConfig,
    options: &ReportOptions,
) -> Result<CmdResult> {
    let summary = collect(probe, config, options)?;
    let text = summary.render(&RenderOptions {
        top_shapes: config.top_shapes,
        example_ids: config.example_ids,
    })?;
    write_report(&options.report_path, &text)?;
    info!(path = %options.report_path.display(), "report written");

    let mut result = CmdResult::default()
        .with_splits(summary.splits)
        .with_probed(summary.samples)
        .with_report(text, options.report_path.clone());
    if let Some(max) = options.max_files {
        result.add_message(CmdMessage::warning(format!(
            "Sampling enabled: at most {} files per directory were inspected.",
            max
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Report written to {}",
        options.report_path.display()
    )));
    Ok(result)
}
