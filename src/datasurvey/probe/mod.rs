//! # Metadata Probing
//!
//! Raster metadata is never decoded here. It is read from the one-line text
//! an external diagnostic tool prints for a file (by default `file`), e.g.
//!
//! ```text
//! 001.tif: TIFF image data, little-endian, height=512, bps=8, width=512 shape": [3, 512, 512]
//! ```
//!
//! The [`MetadataProbe`] trait is the seam between that tool and the rest of
//! the crate:
//!
//! - [`command::CommandProbe`]: production probe, one blocking child process per file
//! - [`memory::CannedProbe`]: canned outputs for tests, records every call
//!
//! Both hand the captured text to [`parse_raster_fields`], the single place
//! that knows the token formats.

use crate::error::Result;
use crate::model::{display_name, FileMetadata, RasterFields, Shape};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

pub mod command;
pub mod memory;

static SHAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"shape": \[([0-9 ,]+)\]"#).unwrap());
static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"height=([0-9]+)").unwrap());
static WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"width=([0-9]+)").unwrap());
static BPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"bps=([0-9]+)").unwrap());

/// Produces [`FileMetadata`] for one file.
pub trait MetadataProbe {
    fn probe(&self, path: &Path) -> Result<FileMetadata>;
}

impl<P: MetadataProbe + ?Sized> MetadataProbe for &P {
    fn probe(&self, path: &Path) -> Result<FileMetadata> {
        (**self).probe(path)
    }
}

/// Extracts every known field from one line of diagnostic text.
///
/// A field whose token is missing, or whose digits do not fit a `u64`, is
/// left as `None`.
pub fn parse_raster_fields(text: &str) -> RasterFields {
    RasterFields {
        shape: capture(&SHAPE_RE, text).and_then(parse_shape),
        height: capture(&HEIGHT_RE, text).and_then(|v| v.parse().ok()),
        width: capture(&WIDTH_RE, text).and_then(|v| v.parse().ok()),
        bits_per_sample: capture(&BPS_RE, text).and_then(|v| v.parse().ok()),
    }
}

/// Builds the metadata record for `path` from the tool's output.
pub fn metadata_from_output(path: &Path, raw: String) -> FileMetadata {
    let fields = parse_raster_fields(&raw);
    FileMetadata {
        name: display_name(path),
        raw,
        fields,
    }
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_shape(dims: &str) -> Option<Shape> {
    dims.split(',')
        .map(|d| d.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()
        .map(Shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extracts_dimension_tokens() {
        let fields = parse_raster_fields("x.tif: TIFF image data, height=512 width=512 bps=8, end");
        assert_eq!(fields.height, Some(512));
        assert_eq!(fields.width, Some(512));
        assert_eq!(fields.bits_per_sample, Some(8));
        assert_eq!(fields.shape, None);
    }

    #[test]
    fn text_without_tokens_leaves_every_field_unset() {
        let fields = parse_raster_fields("x.tif: empty");
        assert!(fields.is_empty());
    }

    #[test]
    fn extracts_embedded_shape() {
        let fields = parse_raster_fields(
            r#"x.tif: TIFF image data, description={"shape": [3, 320, 320]}"#,
        );
        assert_eq!(fields.shape, Some(Shape(vec![3, 320, 320])));
    }

    #[test]
    fn malformed_shape_is_absent() {
        let fields = parse_raster_fields(r#"{"shape": [3, , 320]} height=5"#);
        assert_eq!(fields.shape, None);
        assert_eq!(fields.height, Some(5));
    }

    #[test]
    fn overflowing_numbers_are_absent() {
        let fields = parse_raster_fields("height=99999999999999999999999 width=4");
        assert_eq!(fields.height, None);
        assert_eq!(fields.width, Some(4));
    }

    #[test]
    fn metadata_keeps_name_and_raw_text() {
        let meta =
            metadata_from_output(&PathBuf::from("/data/train_images/7.tif"), "bps=16".into());
        assert_eq!(meta.name, "7.tif");
        assert_eq!(meta.raw, "bps=16");
        assert_eq!(meta.fields.bits_per_sample, Some(16));
    }
}
