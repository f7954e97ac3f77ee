//! File-level conversion: read a file, run its pipeline, write the sibling.
//!
//! `map.bin` becomes `map.json` in the same directory and vice versa. The
//! output is only written once the conversion has succeeded, so a skipped
//! input never leaves a partial file behind.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::{
    descriptor::{Domain, FormatDescriptors, TilesetKind},
    diagnostics::{Converted, Warning},
    document::{self, AttributesDocument, MapGridDocument, MetatilesDocument},
    errors::{Error, Result},
    pipeline::{attributes, mapgrid, metatiles},
};

pub const BIN_EXTENSION: &str = "bin";
pub const JSON_EXTENSION: &str = "json";

/// Outcome of one successful file conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub warnings: Vec<Warning>,
}

/// Warns if `path` does not end in `.expected`. Never blocks a conversion.
pub fn check_extension(path: &Path, expected: &'static str) -> Option<Warning> {
    let matches = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(expected));

    (!matches).then(|| Warning::UnexpectedExtension {
        path: path.to_path_buf(),
        expected,
    })
}

/// Decodes a binary into a document of the given domain. Metatile and
/// attribute header counts follow the tileset kind named by `path`.
pub fn bin_to_json(
    path: &Path,
    domain: Domain,
    descriptors: &FormatDescriptors,
) -> Result<FileReport> {
    let extension_warning = check_extension(path, BIN_EXTENSION);
    let buffer = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let kind = TilesetKind::from_path(path);
    tracing::debug!(path = %path.display(), %domain, ?kind, bytes = buffer.len(), "decoding");

    let converted = decode_domain(domain, descriptors, kind, &buffer)?;
    finish(path, JSON_EXTENSION, extension_warning, converted.map(String::into_bytes))
}

/// Encodes a document of the given domain back into a binary.
pub fn json_to_bin(path: &Path, domain: Domain) -> Result<FileReport> {
    let extension_warning = check_extension(path, JSON_EXTENSION);
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), %domain, "encoding");

    let converted = encode_domain(domain, &text)?;
    finish(path, BIN_EXTENSION, extension_warning, converted)
}

/// Runs the decode pipeline for `domain` and renders the document as JSON.
pub fn decode_domain(
    domain: Domain,
    descriptors: &FormatDescriptors,
    kind: TilesetKind,
    buffer: &[u8],
) -> Result<Converted<String>> {
    let rendered = match domain {
        Domain::Mapgrid => render(mapgrid::decode(&descriptors.mapgrid, buffer)?)?,
        Domain::Metatiles => render(metatiles::decode(&descriptors.metatiles, kind, buffer)?)?,
        Domain::MetatileAttributes => {
            render(attributes::decode(&descriptors.attributes, kind, buffer)?)?
        }
    };

    Ok(rendered)
}

/// Parses a JSON document of the given domain and runs its encode pipeline.
pub fn encode_domain(domain: Domain, text: &str) -> Result<Converted<Vec<u8>>> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }

    match domain {
        Domain::Mapgrid => mapgrid::encode(&document::from_json::<MapGridDocument>(text)?),
        Domain::Metatiles => metatiles::encode(&document::from_json::<MetatilesDocument>(text)?),
        Domain::MetatileAttributes => {
            attributes::encode(&document::from_json::<AttributesDocument>(text)?)
        }
    }
}

fn render<T: serde::Serialize>(converted: Converted<T>) -> Result<Converted<String>> {
    let text = document::to_json(&converted.value)?;
    Ok(converted.map(|_| text))
}

fn finish(
    input: &Path,
    extension: &str,
    extension_warning: Option<Warning>,
    converted: Converted<Vec<u8>>,
) -> Result<FileReport> {
    let output = input.with_extension(extension);
    std::fs::write(&output, &converted.value).map_err(|e| Error::io(&output, e))?;

    let mut warnings: Vec<Warning> = extension_warning.into_iter().collect();
    warnings.extend(converted.warnings);

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        warnings,
    })
}

/// Result of converting a list of files.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<FileReport>,
    pub skipped: Vec<(PathBuf, Error)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.converted.len() + self.skipped.len()
    }

    pub fn warning_count(&self) -> usize {
        self.converted.iter().map(|r| r.warnings.len()).sum()
    }
}

/// Converts each path in order with `convert`.
///
/// A failing file is logged and recorded in [`BatchSummary::skipped`]; the
/// remaining files are still processed.
pub fn convert_all<P, F>(paths: &[P], mut convert: F) -> BatchSummary
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<FileReport>,
{
    let mut summary = BatchSummary::default();

    for path in paths {
        let path = path.as_ref();
        match convert(path) {
            Ok(report) => {
                for warning in &report.warnings {
                    tracing::warn!(path = %path.display(), "{warning}");
                }
                tracing::debug!(output = %report.output.display(), "wrote");
                summary.converted.push(report);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping file");
                summary.skipped.push((path.to_path_buf(), error));
            }
        }
    }

    tracing::info!(
        converted = summary.converted.len(),
        skipped = summary.skipped.len(),
        warnings = summary.warning_count(),
        "batch finished"
    );

    summary
}
