//! Integration tests for the pairwise scan workflow.
//!
//! These tests drive the full path from a real directory listing through
//! extraction, comparison and report generation, using an in-memory tag
//! reader so no EXIF fixtures are needed.

mod common;

use common::{capture, FakeReader};
use exif_pair::core::pipeline::ScanEngine;
use exif_pair::core::scanner;
use exif_pair::error::{InputError, PairFinderError};
use std::fs::File;
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    File::create(dir.path().join(name)).unwrap();
}

#[test]
fn scan_reports_deltas_across_a_directory() {
    let dir = TempDir::new().unwrap();
    // Sorted listing alternates thermal/visual per capture.
    touch(&dir, "cap1_a.jpg");
    touch(&dir, "cap1_b.jpg");
    touch(&dir, "cap2_a.jpg");
    touch(&dir, "cap2_b.jpg");

    let reader = FakeReader::new(vec![
        ("cap1_a.jpg", capture(1_000, 10.0, 20.0, 100.0, true)),
        ("cap1_b.jpg", capture(1_002, 10.0, 20.0, 100.0, false)),
        ("cap2_a.jpg", capture(2_000, 10.5, 20.0, 100.0, true)),
        ("cap2_b.jpg", capture(2_004, 10.5, 20.5, 110.0, false)),
    ]);

    let files = scanner::list_files(dir.path()).unwrap();
    let mut engine = ScanEngine::new(&reader);
    let comparisons = engine.scan_pairs(dir.path(), &files).unwrap();

    assert_eq!(comparisons.len(), 2);
    assert!(comparisons.iter().all(|c| !c.identical));

    let report = engine.report(&comparisons, files.len(), 1).unwrap();
    assert_eq!(report.images_scanned, 4);
    assert_eq!(report.pairs_scanned, 2);
    assert_eq!(report.pairs_with_different_tags, 2);

    // Timestamp deltas were 2s and 4s.
    let date_time = report.date_time.unwrap();
    assert_eq!(date_time.avg, "3.0");
    assert_eq!(date_time.min, "2.0");
    assert_eq!(date_time.max, "4.0");

    // Only the second pair diverged on longitude and altitude.
    assert_eq!(report.longitude.unwrap().avg, "0.5");
    assert_eq!(report.altitude.unwrap().max, "10.0");

    // Latitude agreed everywhere, so it has no series at all.
    assert!(report.latitude.is_none());
}

#[test]
fn identical_rig_output_yields_a_clean_report() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "cap1_a.jpg");
    touch(&dir, "cap1_b.jpg");

    let shared = capture(1_000, 10.0, 20.0, 100.0, false);
    let reader = FakeReader::new(vec![
        ("cap1_a.jpg", shared.clone()),
        ("cap1_b.jpg", shared),
    ]);

    let files = scanner::list_files(dir.path()).unwrap();
    let mut engine = ScanEngine::new(&reader);
    let comparisons = engine.scan_pairs(dir.path(), &files).unwrap();

    assert!(comparisons[0].identical);
    assert!(comparisons[0].difference.is_none());

    let report = engine.report(&comparisons, files.len(), 10).unwrap();
    assert_eq!(report.pairs_with_identical_tags, 1);
    assert_eq!(report.pairs_with_different_tags, 0);
}

#[test]
fn report_without_a_scan_is_refused() {
    let reader = FakeReader::new(vec![]);
    let engine = ScanEngine::new(&reader);

    let err = engine.report(&[], 0, 10).unwrap_err();
    assert!(matches!(err, PairFinderError::Aggregate(_)));
}

#[test]
fn empty_directory_aborts_before_extraction() {
    let dir = TempDir::new().unwrap();
    let err = scanner::list_files(dir.path()).unwrap_err();
    assert!(matches!(err, InputError::EmptyDirectory { .. }));
}

#[test]
fn stray_non_jpeg_aborts_the_scan() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "cap1_a.jpg");
    touch(&dir, "cap1_b.jpg");
    touch(&dir, "flight-notes.txt");

    let reader = FakeReader::new(vec![]);
    let files = scanner::list_files(dir.path()).unwrap();
    let mut engine = ScanEngine::new(&reader);

    let err = engine.scan_pairs(dir.path(), &files).unwrap_err();
    assert!(matches!(
        err,
        PairFinderError::Input(InputError::NotJpeg { .. })
    ));
}

#[test]
fn engine_reuse_without_reset_carries_history() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "cap1_a.jpg");
    touch(&dir, "cap1_b.jpg");

    let reader = FakeReader::new(vec![
        ("cap1_a.jpg", capture(1_000, 10.0, 20.0, 100.0, true)),
        ("cap1_b.jpg", capture(1_010, 10.0, 20.0, 100.0, false)),
    ]);

    let files = scanner::list_files(dir.path()).unwrap();
    let mut engine = ScanEngine::new(&reader);

    engine.scan_pairs(dir.path(), &files).unwrap();
    engine.scan_pairs(dir.path(), &files).unwrap();
    // Two scans without a reset: both timestamp deltas are in the series.
    assert_eq!(engine.deltas().total_recorded(), 2);

    engine.reset();
    let comparisons = engine.scan_pairs(dir.path(), &files).unwrap();
    assert_eq!(engine.deltas().total_recorded(), 1);

    let report = engine.report(&comparisons, files.len(), 0).unwrap();
    assert_eq!(report.date_time.unwrap().avg, "10");
}
