//! # Tags Module
//!
//! Normalized per-image metadata records.
//!
//! A [`TagSet`] is produced once per file by the extraction layer and is
//! immutable afterwards. Every attribute is optional: a missing tag stays
//! `None` and is never conflated with zero.

use serde::{Deserialize, Serialize};

/// The four attributes monitored by comparison and matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagAttribute {
    Altitude,
    Latitude,
    Longitude,
    DateTime,
}

impl TagAttribute {
    /// All monitored attributes, in report order
    pub const ALL: [TagAttribute; 4] = [
        TagAttribute::Altitude,
        TagAttribute::Latitude,
        TagAttribute::Longitude,
        TagAttribute::DateTime,
    ];

    /// The EXIF tag name, used in difference strings
    pub fn tag_name(&self) -> &'static str {
        match self {
            TagAttribute::Altitude => "GPSAltitude",
            TagAttribute::Latitude => "GPSLatitude",
            TagAttribute::Longitude => "GPSLongitude",
            TagAttribute::DateTime => "DateTimeOriginal",
        }
    }

    /// Unit of the attribute's delta, for display
    pub fn unit(&self) -> &'static str {
        match self {
            TagAttribute::Altitude => "m",
            TagAttribute::Latitude | TagAttribute::Longitude => "degrees",
            TagAttribute::DateTime => "seconds",
        }
    }
}

impl std::fmt::Display for TagAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Normalized capture metadata for one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    /// GPS altitude in the source unit (usually meters)
    pub gps_altitude: Option<f64>,
    /// GPS latitude in signed decimal degrees
    pub gps_latitude: Option<f64>,
    /// GPS longitude in signed decimal degrees
    pub gps_longitude: Option<f64>,
    /// Capture timestamp as unix seconds
    pub date_time_original: Option<i64>,
    /// Free-text description, used only to recover a short display name
    pub image_description: Option<String>,
    /// Whether the file carries raw thermal sensor data
    pub has_raw_thermal: bool,
}

impl TagSet {
    /// Value of a monitored attribute, as a float suitable for delta math.
    ///
    /// Timestamps are unix seconds and convert exactly for any realistic date.
    pub fn value(&self, attr: TagAttribute) -> Option<f64> {
        match attr {
            TagAttribute::Altitude => self.gps_altitude,
            TagAttribute::Latitude => self.gps_latitude,
            TagAttribute::Longitude => self.gps_longitude,
            TagAttribute::DateTime => self.date_time_original.map(|t| t as f64),
        }
    }

    /// Short display name recovered from the description.
    ///
    /// The rigs this tool was built for write the capture path into
    /// ImageDescription; the third `/`-separated segment is the file name.
    pub fn short_name(&self) -> String {
        self.image_description
            .as_deref()
            .and_then(|d| d.split('/').nth(2))
            .unwrap_or("")
            .to_string()
    }

    /// Whether this image came from the radiometric (thermal) sensor.
    ///
    /// The partition is two-way: anything without the raw-thermal marker
    /// is treated as RGB.
    pub fn is_radiometric(&self) -> bool {
        self.has_raw_thermal
    }
}

/// A file identifier paired with its extracted tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedImage {
    /// File name within the scanned directory
    pub name: String,
    /// Extracted capture metadata
    pub tags: TagSet,
}
