//! Shared test doubles for the integration tests.

use exif_pair::core::tags::TagSet;
use exif_pair::core::TagReader;
use exif_pair::error::ExtractError;
use std::collections::HashMap;
use std::path::Path;

/// In-memory tag reader keyed by file name.
///
/// Lets the integration tests drive the full engine against real
/// directories of placeholder files without needing EXIF fixtures.
pub struct FakeReader {
    tags: HashMap<String, TagSet>,
}

impl FakeReader {
    pub fn new(entries: Vec<(&str, TagSet)>) -> Self {
        Self {
            tags: entries
                .into_iter()
                .map(|(name, tags)| (name.to_string(), tags))
                .collect(),
        }
    }
}

impl TagReader for FakeReader {
    fn read_tags(&self, path: &Path) -> Result<TagSet, ExtractError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.tags
            .get(&name)
            .cloned()
            .ok_or(ExtractError::MissingTimestamp {
                path: path.to_path_buf(),
            })
    }
}

/// A fully-populated tag set for a capture at `time` and the given position
pub fn capture(time: i64, lat: f64, lon: f64, alt: f64, thermal: bool) -> TagSet {
    TagSet {
        gps_altitude: Some(alt),
        gps_latitude: Some(lat),
        gps_longitude: Some(lon),
        date_time_original: Some(time),
        image_description: None,
        has_raw_thermal: thermal,
    }
}
