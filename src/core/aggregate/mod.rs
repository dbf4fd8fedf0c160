//! # Aggregate Module
//!
//! Accumulates per-attribute deltas across many comparisons and reduces them
//! to a directory-wide scan report.
//!
//! The [`DeltaAccumulator`] is an explicit object handed to the comparator
//! rather than hidden shared state, so independent scans can run without
//! reset races. Callers sharing one accumulator across scans must call
//! [`DeltaAccumulator::reset`] in between; stale history otherwise carries
//! into the next report.

use crate::core::comparator::TagComparison;
use crate::core::tags::TagAttribute;
use crate::error::AggregateError;
use serde::{Deserialize, Serialize};

/// Append-only delta series for the four monitored attributes
#[derive(Debug, Clone, Default)]
pub struct DeltaAccumulator {
    altitude: Vec<f64>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    date_time: Vec<f64>,
}

impl DeltaAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta to the given attribute's series
    pub fn record(&mut self, attr: TagAttribute, delta: f64) {
        self.series_mut(attr).push(delta);
    }

    /// The recorded series for one attribute
    pub fn series(&self, attr: TagAttribute) -> &[f64] {
        match attr {
            TagAttribute::Altitude => &self.altitude,
            TagAttribute::Latitude => &self.latitude,
            TagAttribute::Longitude => &self.longitude,
            TagAttribute::DateTime => &self.date_time,
        }
    }

    /// Clear every series, making the accumulator ready for a new scan
    pub fn reset(&mut self) {
        self.altitude.clear();
        self.latitude.clear();
        self.longitude.clear();
        self.date_time.clear();
    }

    /// Total number of deltas recorded across all attributes
    pub fn total_recorded(&self) -> usize {
        TagAttribute::ALL.iter().map(|a| self.series(*a).len()).sum()
    }

    fn series_mut(&mut self, attr: TagAttribute) -> &mut Vec<f64> {
        match attr {
            TagAttribute::Altitude => &mut self.altitude,
            TagAttribute::Latitude => &mut self.latitude,
            TagAttribute::Longitude => &mut self.longitude,
            TagAttribute::DateTime => &mut self.date_time,
        }
    }
}

/// Average/min/max of one attribute's delta series, rendered to a fixed
/// number of decimal digits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStats {
    pub avg: String,
    pub min: String,
    pub max: String,
}

/// Aggregate snapshot of a full-directory scan.
///
/// Recomputed fresh from the accumulated series each time; nothing is cached
/// incrementally. An attribute whose series stayed empty (equal in every
/// pair) reports `None` instead of garbage extrema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirScanReport {
    pub images_scanned: usize,
    pub pairs_scanned: usize,
    pub pairs_with_identical_tags: usize,
    pub pairs_with_different_tags: usize,
    pub altitude: Option<AttributeStats>,
    pub latitude: Option<AttributeStats>,
    pub longitude: Option<AttributeStats>,
    pub date_time: Option<AttributeStats>,
}

impl DirScanReport {
    /// Stats for one attribute, if any deltas were recorded for it
    pub fn stats(&self, attr: TagAttribute) -> Option<&AttributeStats> {
        match attr {
            TagAttribute::Altitude => self.altitude.as_ref(),
            TagAttribute::Latitude => self.latitude.as_ref(),
            TagAttribute::Longitude => self.longitude.as_ref(),
            TagAttribute::DateTime => self.date_time.as_ref(),
        }
    }
}

/// Reduce the accumulated deltas and comparison verdicts to a report.
///
/// `precision` is the number of decimal digits in every numeric field.
/// Requesting a report before any comparison happened is a contract
/// violation and fails with [`AggregateError::NoComparisons`].
pub fn report(
    deltas: &DeltaAccumulator,
    comparisons: &[TagComparison],
    images_scanned: usize,
    precision: usize,
) -> Result<DirScanReport, AggregateError> {
    if comparisons.is_empty() {
        return Err(AggregateError::NoComparisons);
    }

    let identical = comparisons.iter().filter(|c| c.identical).count();

    Ok(DirScanReport {
        images_scanned,
        pairs_scanned: comparisons.len(),
        pairs_with_identical_tags: identical,
        pairs_with_different_tags: comparisons.len() - identical,
        altitude: series_stats(deltas.series(TagAttribute::Altitude), precision),
        latitude: series_stats(deltas.series(TagAttribute::Latitude), precision),
        longitude: series_stats(deltas.series(TagAttribute::Longitude), precision),
        date_time: series_stats(deltas.series(TagAttribute::DateTime), precision),
    })
}

fn series_stats(series: &[f64], precision: usize) -> Option<AttributeStats> {
    if series.is_empty() {
        return None;
    }

    let sum: f64 = series.iter().sum();
    let avg = sum / series.len() as f64;
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(AttributeStats {
        avg: format!("{:.*}", precision, avg),
        min: format!("{:.*}", precision, min),
        max: format!("{:.*}", precision, max),
    })
}
