use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::probe::MetadataProbe;
use std::path::PathBuf;

/// Probes arbitrary files; the first failure aborts.
pub fn run<P: MetadataProbe + ?Sized>(probe: &P, paths: &[PathBuf]) -> Result<CmdResult> {
    let probed = paths
        .iter()
        .map(|p| probe.probe(p))
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    let blank = probed.iter().filter(|m| m.fields.is_empty()).count();
    if blank > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} file(s) produced no recognizable metadata.",
            blank
        )));
    }
    Ok(result.with_probed(probed))
}
