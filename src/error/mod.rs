//! # Error Module
//!
//! User-friendly error types for the pairing tool.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fail fast** - extraction failures and empty aggregates abort the scan;
//!   there are no transient-failure classes and nothing is retried

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PairFinderError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Tag extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Aggregation error: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors in the input directory or file list
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Directory is empty: {path}")]
    EmptyDirectory { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a JPEG file: {path}")]
    NotJpeg { path: PathBuf },

    #[error("Directory {path} holds {count} files; pairwise scanning needs an even count")]
    UnpairedFile { path: PathBuf, count: usize },

    #[error("Filename pattern did not match the directory contents")]
    PatternMismatch,

    #[error("Pattern mode requires --starts-with, --pattern-rgb and --pattern-radiometric")]
    MissingPatternFlags,
}

/// Errors while extracting EXIF tags from a single image
///
/// All of these are fatal for the whole scan; there is no
/// skip-and-continue policy.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to read image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not extract tags from {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Image {path} has no DateTimeOriginal tag")]
    MissingTimestamp { path: PathBuf },

    #[error("Image {path} has an unparseable DateTimeOriginal: {value}")]
    InvalidTimestamp { path: PathBuf, value: String },
}

/// Errors from reductions over empty data
///
/// Callers must guard these rather than let a division by zero
/// silently produce NaN.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("No comparisons were recorded; scan at least one image pair before requesting a report")]
    NoComparisons,

    #[error("No produced pairs; cannot compute accuracy over an empty pairing")]
    NoProducedPairs,
}

/// Errors while reading or writing JSON artifacts
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize or parse JSON for {path}: {reason}")]
    Json { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PairFinderError>;
