//! # Extract Module
//!
//! Reads EXIF capture metadata out of image files and normalizes it into
//! [`TagSet`] records.
//!
//! ## Extracted Fields
//! - Capture timestamp (DateTimeOriginal, required)
//! - GPS latitude/longitude (deg/min/sec rationals to signed decimal degrees)
//! - GPS altitude (with the below-sea-level reference flag)
//! - Image description (for short display names)
//! - Raw-thermal-data marker (radiometric detection)
//!
//! Extraction is a capability: engine code takes a [`TagReader`] parameter
//! instead of reaching for a global, so tests can inject a double and
//! independent scans never share reader state.

use crate::core::tags::TagSet;
use crate::error::ExtractError;
use chrono::NaiveDateTime;
use exif::{In, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// Capability for turning an image file into a tag set
pub trait TagReader: Send + Sync {
    /// Extract tags from the image at `path`.
    ///
    /// Fails on unreadable files and on files without a usable
    /// DateTimeOriginal; failures are fatal for the whole scan.
    fn read_tags(&self, path: &Path) -> Result<TagSet, ExtractError>;
}

/// EXIF-based tag reader for JPEG/TIFF files
#[derive(Debug, Default, Clone)]
pub struct ExifTagReader;

impl ExifTagReader {
    pub fn new() -> Self {
        Self
    }
}

impl TagReader for ExifTagReader {
    fn read_tags(&self, path: &Path) -> Result<TagSet, ExtractError> {
        let buf = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let exif = exif::Reader::new()
            .read_from_container(&mut Cursor::new(&buf))
            .map_err(|e| ExtractError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let raw_datetime = ascii_field(&exif, Tag::DateTimeOriginal).ok_or_else(|| {
            ExtractError::MissingTimestamp {
                path: path.to_path_buf(),
            }
        })?;
        let date_time_original = Some(parse_exif_datetime(&raw_datetime, path)?);

        Ok(TagSet {
            gps_altitude: altitude(&exif),
            gps_latitude: coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, "S"),
            gps_longitude: coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, "W"),
            date_time_original,
            image_description: ascii_field(&exif, Tag::ImageDescription),
            has_raw_thermal: has_flir_segment(&buf),
        })
    }
}

/// Parse an EXIF `"YYYY:MM:DD HH:MM:SS"` timestamp into unix seconds.
///
/// The EXIF string carries no zone; it is taken as UTC, matching how the
/// paired rigs stamp both sensors from one clock.
fn parse_exif_datetime(raw: &str, path: &Path) -> Result<i64, ExtractError> {
    let trimmed = raw.trim().trim_end_matches('\0');
    NaiveDateTime::parse_from_str(trimmed, "%Y:%m:%d %H:%M:%S")
        .map(|naive| naive.and_utc().timestamp())
        .map_err(|_| ExtractError::InvalidTimestamp {
            path: path.to_path_buf(),
            value: trimmed.to_string(),
        })
}

/// First ASCII value of a tag, trimmed of padding
fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    if let Value::Ascii(ref vec) = field.value {
        let bytes = vec.first()?;
        let s = std::str::from_utf8(bytes).ok()?;
        let trimmed = s.trim_end_matches('\0').trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

/// GPS coordinate as signed decimal degrees.
///
/// EXIF stores deg/min/sec as three rationals plus a hemisphere reference;
/// `negative_ref` is the hemisphere letter that flips the sign.
fn coordinate(exif: &exif::Exif, value_tag: Tag, ref_tag: Tag, negative_ref: &str) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let Value::Rational(ref parts) = field.value else {
        return None;
    };
    if parts.len() < 3 {
        return None;
    }

    let degrees =
        parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0;

    let sign = match ascii_field(exif, ref_tag) {
        Some(r) if r.eq_ignore_ascii_case(negative_ref) => -1.0,
        _ => 1.0,
    };

    Some(sign * degrees)
}

/// GPS altitude, negated when the reference byte marks below sea level
fn altitude(exif: &exif::Exif) -> Option<f64> {
    let field = exif.get_field(Tag::GPSAltitude, In::PRIMARY)?;
    let Value::Rational(ref parts) = field.value else {
        return None;
    };
    let meters = parts.first()?.to_f64();

    let below_sea_level = matches!(
        exif.get_field(Tag::GPSAltitudeRef, In::PRIMARY).map(|f| &f.value),
        Some(Value::Byte(bytes)) if bytes.first() == Some(&1)
    );

    Some(if below_sea_level { -meters } else { meters })
}

/// Detect the raw-thermal-data marker.
///
/// FLIR radiometric JPEGs carry their sensor data in APP1 segments whose
/// payload starts with the `FLIR` signature; an image without any such
/// segment is a plain RGB capture.
fn has_flir_segment(buf: &[u8]) -> bool {
    buf.windows(8)
        .any(|w| w[0] == 0xFF && w[1] == 0xE1 && &w[4..8] == b"FLIR")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn read_tags_on_missing_file_is_io_error() {
        let reader = ExifTagReader::new();
        let err = reader
            .read_tags(Path::new("/nonexistent/thermal.jpg"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn read_tags_on_garbage_bytes_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-an-image.jpg");
        std::fs::write(&path, b"definitely not a JPEG").unwrap();

        let reader = ExifTagReader::new();
        let err = reader.read_tags(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
    }

    #[test]
    fn exif_datetime_parses_to_unix_seconds() {
        let ts = parse_exif_datetime("2021:06:01 12:00:00", &PathBuf::from("x.jpg")).unwrap();
        assert_eq!(ts, 1_622_548_800);
    }

    #[test]
    fn exif_datetime_tolerates_nul_padding() {
        let ts = parse_exif_datetime("2021:06:01 12:00:00\0", &PathBuf::from("x.jpg")).unwrap();
        assert_eq!(ts, 1_622_548_800);
    }

    #[test]
    fn malformed_datetime_is_invalid_timestamp() {
        let err = parse_exif_datetime("yesterday-ish", &PathBuf::from("x.jpg")).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidTimestamp { .. }));
    }

    #[test]
    fn flir_app1_segment_is_detected() {
        // APP1 marker, length, then the FLIR signature.
        let buf = [
            0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10, b'F', b'L', b'I', b'R', 0x00, 0x01,
        ];
        assert!(has_flir_segment(&buf));
    }

    #[test]
    fn plain_jpeg_has_no_flir_segment() {
        let buf = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
        assert!(!has_flir_segment(&buf));
    }

    #[test]
    fn flir_bytes_outside_app1_are_ignored() {
        let buf = [0x00, 0x00, b'F', b'L', b'I', b'R', 0x00, 0x00, 0x00];
        assert!(!has_flir_segment(&buf));
    }
}
