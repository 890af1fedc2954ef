use crate::error::{Result, SurveyError};
use crate::model::{Manifest, ManifestRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Reads a comma separated manifest whose header contains `id_column`.
///
/// Rows shorter than the header are accepted; their missing cells read as
/// empty strings.
pub fn read_manifest(path: &Path, id_column: &str) -> Result<Manifest> {
    let file = File::open(path).map_err(|e| SurveyError::read(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let id_index = columns
        .iter()
        .position(|c| c == id_column)
        .ok_or_else(|| SurveyError::MissingColumn {
            path: path.to_path_buf(),
            column: id_column.to_string(),
        })?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| malformed(path, e))?;
        let fields: BTreeMap<String, String> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (col.clone(), row.get(i).unwrap_or_default().to_string()))
            .collect();
        let id = row.get(id_index).unwrap_or_default().to_string();
        records.push(ManifestRecord::new(id, fields));
    }

    debug!(path = %path.display(), rows = records.len(), "read manifest");
    Ok(Manifest {
        path: path.to_path_buf(),
        columns,
        records,
    })
}

fn malformed(path: &Path, source: csv::Error) -> SurveyError {
    SurveyError::Manifest {
        path: path.to_path_buf(),
        source,
    }
}
