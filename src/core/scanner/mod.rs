//! # Scanner Module
//!
//! Flat directory listing for the pairing workflows.
//!
//! Listings are sorted by file name, which is what gives the pairwise scan
//! and the pattern matcher their alternating pair order: paired rigs write
//! the two frames of a capture with adjacent names.

use crate::error::InputError;
use std::path::Path;
use walkdir::WalkDir;

/// List the files of `dir`, sorted by file name.
///
/// Subdirectories and hidden files are skipped; only the directory's own
/// files are listed. An empty result is an error - every workflow needs at
/// least one image.
pub fn list_files(dir: &Path) -> Result<Vec<String>, InputError> {
    if !dir.exists() {
        return Err(InputError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(InputError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| InputError::ReadDirectory {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        files.push(name);
    }

    if files.is_empty() {
        return Err(InputError::EmptyDirectory {
            path: dir.to_path_buf(),
        });
    }

    Ok(files)
}

/// Check that every listed file is a JPEG.
///
/// The pairwise scan workflow requires a homogeneous directory; a stray
/// sidecar or raw file aborts the run rather than skewing the pairing.
pub fn ensure_jpeg_only(dir: &Path, files: &[String]) -> Result<(), InputError> {
    match files.iter().find(|name| !is_jpeg(name)) {
        Some(name) => Err(InputError::NotJpeg {
            path: dir.join(name),
        }),
        None => Ok(()),
    }
}

/// Whether a file name carries a JPEG extension
pub fn is_jpeg(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false)
}
