use datasurvey::api::SurveyApi;
use datasurvey::commands::ReportOptions;
use datasurvey::config::SurveyConfig;
use datasurvey::error::ErrorKind;
use datasurvey::model::Split;
use datasurvey::probe::memory::CannedProbe;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(root: &Path, name: &str, ids: &[&str]) {
    let mut content = String::from("id,scroll_id\n");
    for id in ids {
        content.push_str(&format!("{},34117\n", id));
    }
    fs::write(root.join(name), content).unwrap();
}

fn write_files(root: &Path, dir: &str, ids: &[&str]) {
    let dir = root.join(dir);
    fs::create_dir_all(&dir).unwrap();
    for id in ids {
        fs::write(dir.join(format!("{}.tif", id)), b"II*\0").unwrap();
    }
}

fn options(root: &Path, max_files: Option<usize>) -> ReportOptions {
    ReportOptions {
        data_root: root.to_path_buf(),
        report_path: root.join("analysis").join("readme.md"),
        max_files,
    }
}

#[test]
fn test_end_to_end_reconciliation() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_manifest(root, "train.csv", &["001", "002", "003"]);
    write_manifest(root, "test.csv", &["100"]);
    write_files(root, "train_images", &["001", "003", "004"]);
    write_files(root, "train_labels", &["001", "002", "003"]);
    write_files(root, "test_images", &["100"]);

    let rgb = r#"TIFF image data, height=512, bps=8, width=512 shape": [3, 512, 512]"#;
    let gray = r#"TIFF image data, height=256, bps=8, width=256 shape": [1, 256, 256]"#;
    let probe = CannedProbe::new()
        .with_output("001.tif", rgb)
        .with_output("003.tif", rgb)
        .with_output("004.tif", gray)
        .with_output("002.tif", "TIFF image data, height=512, bps=8, width=512");
    let api = SurveyApi::new(probe, SurveyConfig::default());

    let result = api.report(&options(root, None)).unwrap();

    let images = result
        .splits
        .iter()
        .find(|s| s.split == Split::TrainImages)
        .unwrap();
    assert_eq!(images.reconciliation.missing, vec!["002"]);
    assert_eq!(images.reconciliation.extra, vec!["004"]);

    let text = result.report.unwrap();
    assert!(text.contains("- train.csv: 3 rows | test.csv: 1 rows\n"));
    assert!(text.contains("- Train images missing vs manifest: 1 (e.g. 002)\n"));
    assert!(text.contains("- Train images extra vs manifest: 1 (e.g. 004)\n"));
    assert!(text.contains("- Train labels: perfect match with the manifest.\n"));
    assert!(text.contains("- Test images: perfect match with the manifest.\n"));
    assert!(text.contains(
        "- Train image shapes: 2 unique shape(s) (top 5) → (3, 512, 512): 2, (1, 256, 256): 1\n"
    ));
    assert!(text.contains("- 004.tif: shape=(1, 256, 256) height=256 width=256 bps=8\n"));
    assert!(text.contains("- 002.tif: shape=n/a height=512 width=512 bps=8\n"));

    let on_disk = fs::read_to_string(root.join("analysis").join("readme.md")).unwrap();
    assert_eq!(on_disk, text);
}

#[test]
fn test_sampling_probes_exactly_max_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let ids = ["a", "b", "c", "d", "e"];
    write_manifest(root, "train.csv", &["a"]);
    write_manifest(root, "test.csv", &[]);
    write_files(root, "train_images", &ids);
    write_files(root, "train_labels", &[]);
    write_files(root, "test_images", &[]);

    let api = SurveyApi::new(CannedProbe::new().with_fallback("bps=8"), SurveyConfig::default());
    let result = api.report(&options(root, Some(2))).unwrap();

    let probed: Vec<_> = api
        .probe()
        .calls()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(probed, vec!["a.tif", "b.tif"]);

    let text = result.report.unwrap();
    assert!(text.contains("train_images=2 (of 5)"));
    assert!(text.contains("Sampling enabled: only the first 2 files"));
}

#[test]
fn test_missing_manifest_is_a_read_error_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_manifest(root, "train.csv", &["1"]);
    write_files(root, "train_images", &["1"]);

    let api = SurveyApi::new(CannedProbe::new().with_fallback("bps=8"), SurveyConfig::default());
    let err = api.report(&options(root, None)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Read);
    assert!(!root.join("analysis").exists());
    assert_eq!(api.probe().call_count(), 0);
}

#[test]
fn test_custom_layout_and_extension() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("fragments.csv"), "fragment\nf1\nf2\n").unwrap();
    fs::write(root.join("holdout.csv"), "fragment\n").unwrap();
    for dir in ["surface", "ink", "blind"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("surface").join("f1.tiff"), b"").unwrap();
    fs::write(root.join("surface").join("f2.tiff"), b"").unwrap();
    fs::write(root.join("surface").join("f3.tif"), b"").unwrap();

    let mut config = SurveyConfig::default();
    config.layout.train_manifest = "fragments.csv".into();
    config.layout.test_manifest = "holdout.csv".into();
    config.layout.train_images = "surface".into();
    config.layout.train_labels = "ink".into();
    config.layout.test_images = "blind".into();
    config.id_column = "fragment".into();
    config.set_extension(".tiff");

    let api = SurveyApi::new(CannedProbe::new(), config);
    let result = api.check(root, None).unwrap();

    assert!(result.splits[0].reconciliation.is_exact());
    assert_eq!(result.splits[1].reconciliation.missing, vec!["f1", "f2"]);
}
