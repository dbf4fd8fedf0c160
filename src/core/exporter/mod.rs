//! # Exporter Module
//!
//! Wholesale JSON import/export of pairing lists, scan reports and
//! comparison results.
//!
//! Files are read and written in one piece; there is no incremental or
//! streaming IO. Comparison exports carry no raw tag sets - the
//! [`TagComparison`] record never held them, so exports are stripped by
//! construction.

use crate::core::aggregate::DirScanReport;
use crate::core::comparator::TagComparison;
use crate::core::matcher::ImagePair;
use crate::error::ExportError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Default file name for exported pairings
pub const PAIRS_FILE: &str = "pairs.json";
/// Default file name for exported scan reports
pub const REPORT_FILE: &str = "scan-report.json";
/// Default file name for exported comparison lists
pub const COMPARISON_FILE: &str = "scan-comparison.json";

/// Serialize any exportable value as pretty JSON into a writer
pub fn write_json<T: Serialize, W: Write>(value: &T, writer: W, path: &Path) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, value).map_err(|e| ExportError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write a pairing list to `path`
pub fn save_pairs(path: &Path, pairs: &[ImagePair]) -> Result<(), ExportError> {
    save(path, &pairs)
}

/// Read a pairing list (e.g. a trusted reference pairing) from `path`
pub fn load_pairs(path: &Path) -> Result<Vec<ImagePair>, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| ExportError::Json {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write a scan report to `path`
pub fn save_report(path: &Path, report: &DirScanReport) -> Result<(), ExportError> {
    save(path, report)
}

/// Write a comparison list to `path`
pub fn save_comparisons(path: &Path, comparisons: &[TagComparison]) -> Result<(), ExportError> {
    save(path, &comparisons)
}

fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_json(value, BufWriter::new(file), path)
}
