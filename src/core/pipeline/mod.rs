//! # Pipeline Module
//!
//! Orchestrates the scan and matching workflows on top of the leaf modules.
//!
//! ## Workflows
//! - **Pairwise scan** - walk an alternating file listing two files at a
//!   time, extract both tag sets, compare them, and accumulate deltas for
//!   the directory report
//! - **Population build** - extract tags for every file and partition the
//!   set into radiometric and RGB populations for the metric matcher
//!
//! The engine holds a [`TagReader`] capability and its own
//! [`DeltaAccumulator`]; nothing is global, so independent scans can run
//! side by side. Reusing one engine across scans requires [`ScanEngine::reset`]
//! in between - stale delta history otherwise carries into the next report.

use crate::core::aggregate::{self, DeltaAccumulator, DirScanReport};
use crate::core::comparator::{self, TagComparison};
use crate::core::extract::TagReader;
use crate::core::scanner;
use crate::core::tags::NamedImage;
use crate::error::{InputError, Result};
use crate::events::{
    CompareEvent, Event, EventSender, ExtractEvent, ExtractProgress, null_sender,
};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// The pairing engine for one or more sequential scans
pub struct ScanEngine<'a> {
    reader: &'a dyn TagReader,
    deltas: DeltaAccumulator,
}

impl<'a> ScanEngine<'a> {
    /// Create an engine around a tag-reading capability
    pub fn new(reader: &'a dyn TagReader) -> Self {
        Self {
            reader,
            deltas: DeltaAccumulator::new(),
        }
    }

    /// The delta history accumulated so far
    pub fn deltas(&self) -> &DeltaAccumulator {
        &self.deltas
    }

    /// Clear all accumulated delta history, readying the engine for an
    /// independent scan
    pub fn reset(&mut self) {
        self.deltas.reset();
    }

    /// Compare an alternating file listing pair by pair.
    ///
    /// `files` must hold the directory's images in pair order (even index
    /// first of each pair). The listing must be homogeneous JPEG and of
    /// even length; extraction failures abort the whole scan.
    pub fn scan_pairs(&mut self, dir: &Path, files: &[String]) -> Result<Vec<TagComparison>> {
        self.scan_pairs_with_events(dir, files, &null_sender())
    }

    /// [`ScanEngine::scan_pairs`] with progress events
    pub fn scan_pairs_with_events(
        &mut self,
        dir: &Path,
        files: &[String],
        events: &EventSender,
    ) -> Result<Vec<TagComparison>> {
        scanner::ensure_jpeg_only(dir, files)?;
        if files.len() % 2 != 0 {
            return Err(InputError::UnpairedFile {
                path: dir.to_path_buf(),
                count: files.len(),
            }
            .into());
        }

        let total = files.len() / 2;
        events.send(Event::Compare(CompareEvent::Started { total_pairs: total }));
        tracing::debug!(pairs = total, "starting pairwise scan");

        let mut comparisons = Vec::with_capacity(total);
        for pair in files.chunks_exact(2) {
            let tags_a = self.reader.read_tags(&dir.join(&pair[0]))?;
            let tags_b = self.reader.read_tags(&dir.join(&pair[1]))?;
            comparisons.push(comparator::compare(&tags_a, &tags_b, &mut self.deltas));

            events.send(Event::Compare(CompareEvent::PairCompared {
                completed: comparisons.len(),
                total,
            }));
        }

        let identical = comparisons.iter().filter(|c| c.identical).count();
        events.send(Event::Compare(CompareEvent::Completed {
            identical,
            different: comparisons.len() - identical,
        }));

        Ok(comparisons)
    }

    /// Reduce the accumulated deltas to a directory report.
    ///
    /// Purely a read; the engine's state is untouched and the report is
    /// recomputed fresh on every call.
    pub fn report(
        &self,
        comparisons: &[TagComparison],
        images_scanned: usize,
        precision: usize,
    ) -> Result<DirScanReport> {
        Ok(aggregate::report(
            &self.deltas,
            comparisons,
            images_scanned,
            precision,
        )?)
    }

    /// Extract tags for every file and split the set into the radiometric
    /// and RGB populations.
    pub fn load_populations(
        &self,
        dir: &Path,
        files: &[String],
    ) -> Result<(Vec<NamedImage>, Vec<NamedImage>)> {
        self.load_populations_with_events(dir, files, &null_sender())
    }

    /// [`ScanEngine::load_populations`] with progress events.
    ///
    /// Extraction runs in parallel; population order still mirrors the
    /// input file order, and any extraction failure fails the whole build.
    pub fn load_populations_with_events(
        &self,
        dir: &Path,
        files: &[String],
        events: &EventSender,
    ) -> Result<(Vec<NamedImage>, Vec<NamedImage>)> {
        events.send(Event::Extract(ExtractEvent::Started {
            total_files: files.len(),
        }));

        let completed = AtomicUsize::new(0);
        let images = files
            .par_iter()
            .map(|name| {
                let path = dir.join(name);
                let tags = self.reader.read_tags(&path)?;

                events.send(Event::Extract(ExtractEvent::Progress(ExtractProgress {
                    completed: completed.fetch_add(1, Ordering::Relaxed) + 1,
                    total: files.len(),
                    current_path: path,
                })));

                Ok(NamedImage {
                    name: name.clone(),
                    tags,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        events.send(Event::Extract(ExtractEvent::Completed {
            total_extracted: images.len(),
        }));

        let (radiometric, rgb): (Vec<_>, Vec<_>) =
            images.into_iter().partition(|img| img.tags.is_radiometric());

        tracing::debug!(
            radiometric = radiometric.len(),
            rgb = rgb.len(),
            "populations built"
        );

        Ok((radiometric, rgb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tags::TagSet;
    use crate::error::{ExtractError, PairFinderError};
    use std::collections::HashMap;

    /// Tag reader double keyed by file name
    struct FakeReader {
        tags: HashMap<String, TagSet>,
    }

    impl FakeReader {
        fn new(entries: &[(&str, TagSet)]) -> Self {
            Self {
                tags: entries
                    .iter()
                    .map(|(name, tags)| (name.to_string(), tags.clone()))
                    .collect(),
            }
        }
    }

    impl TagReader for FakeReader {
        fn read_tags(&self, path: &Path) -> std::result::Result<TagSet, ExtractError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.tags
                .get(&name)
                .cloned()
                .ok_or(ExtractError::MissingTimestamp {
                    path: path.to_path_buf(),
                })
        }
    }

    fn tags(time: i64, alt: f64) -> TagSet {
        TagSet {
            date_time_original: Some(time),
            gps_altitude: Some(alt),
            ..Default::default()
        }
    }

    fn names(files: &[&str]) -> Vec<String> {
        files.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn scan_pairs_compares_consecutive_files() {
        let reader = FakeReader::new(&[
            ("a_T.jpg", tags(1_000, 100.0)),
            ("a_V.jpg", tags(1_000, 100.0)),
            ("b_T.jpg", tags(2_000, 100.0)),
            ("b_V.jpg", tags(2_004, 103.0)),
        ]);
        let mut engine = ScanEngine::new(&reader);

        let files = names(&["a_T.jpg", "a_V.jpg", "b_T.jpg", "b_V.jpg"]);
        let comparisons = engine.scan_pairs(Path::new("/flights"), &files).unwrap();

        assert_eq!(comparisons.len(), 2);
        assert!(comparisons[0].identical);
        assert!(!comparisons[1].identical);

        let report = engine.report(&comparisons, files.len(), 1).unwrap();
        assert_eq!(report.images_scanned, 4);
        assert_eq!(report.pairs_scanned, 2);
        assert_eq!(report.pairs_with_identical_tags, 1);
        assert_eq!(report.date_time.unwrap().avg, "4.0");
        assert_eq!(report.altitude.unwrap().max, "3.0");
    }

    #[test]
    fn odd_file_count_fails_fast() {
        let reader = FakeReader::new(&[("a_T.jpg", tags(1_000, 100.0))]);
        let mut engine = ScanEngine::new(&reader);

        let err = engine
            .scan_pairs(Path::new("/flights"), &names(&["a_T.jpg"]))
            .unwrap_err();
        assert!(matches!(
            err,
            PairFinderError::Input(InputError::UnpairedFile { count: 1, .. })
        ));
    }

    #[test]
    fn non_jpeg_member_fails_the_scan() {
        let reader = FakeReader::new(&[]);
        let mut engine = ScanEngine::new(&reader);

        let err = engine
            .scan_pairs(Path::new("/flights"), &names(&["a.jpg", "notes.txt"]))
            .unwrap_err();
        assert!(matches!(
            err,
            PairFinderError::Input(InputError::NotJpeg { .. })
        ));
    }

    #[test]
    fn extraction_failure_aborts_the_scan() {
        let reader = FakeReader::new(&[("a_T.jpg", tags(1_000, 100.0))]);
        let mut engine = ScanEngine::new(&reader);

        let err = engine
            .scan_pairs(Path::new("/flights"), &names(&["a_T.jpg", "missing.jpg"]))
            .unwrap_err();
        assert!(matches!(err, PairFinderError::Extract(_)));
    }

    #[test]
    fn reset_discards_delta_history_between_scans() {
        let reader = FakeReader::new(&[
            ("a_T.jpg", tags(1_000, 100.0)),
            ("a_V.jpg", tags(1_010, 100.0)),
        ]);
        let mut engine = ScanEngine::new(&reader);
        let files = names(&["a_T.jpg", "a_V.jpg"]);

        engine.scan_pairs(Path::new("/flights"), &files).unwrap();
        assert_eq!(engine.deltas().total_recorded(), 1);

        engine.reset();
        assert_eq!(engine.deltas().total_recorded(), 0);
    }

    #[test]
    fn populations_partition_on_the_thermal_marker() {
        let thermal = TagSet {
            has_raw_thermal: true,
            ..tags(1_000, 100.0)
        };
        let reader = FakeReader::new(&[
            ("a_T.jpg", thermal.clone()),
            ("a_V.jpg", tags(1_000, 100.0)),
            ("b_T.jpg", thermal),
            ("b_V.jpg", tags(2_000, 100.0)),
        ]);
        let engine = ScanEngine::new(&reader);

        let files = names(&["a_T.jpg", "a_V.jpg", "b_T.jpg", "b_V.jpg"]);
        let (radiometric, rgb) = engine
            .load_populations(Path::new("/flights"), &files)
            .unwrap();

        let thermal_names: Vec<_> = radiometric.iter().map(|i| i.name.as_str()).collect();
        let rgb_names: Vec<_> = rgb.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(thermal_names, vec!["a_T.jpg", "b_T.jpg"]);
        assert_eq!(rgb_names, vec!["a_V.jpg", "b_V.jpg"]);
    }

    #[test]
    fn population_build_surfaces_extraction_errors() {
        let reader = FakeReader::new(&[("a_T.jpg", tags(1_000, 100.0))]);
        let engine = ScanEngine::new(&reader);

        let err = engine
            .load_populations(Path::new("/flights"), &names(&["a_T.jpg", "broken.jpg"]))
            .unwrap_err();
        assert!(matches!(err, PairFinderError::Extract(_)));
    }
}
