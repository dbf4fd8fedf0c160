//! Metric pairing: nearest-neighbor matching over capture metadata.
//!
//! ## How It Works
//! For each radiometric image, every RGB image is scanned linearly:
//! 1. An exact match on all four monitored attributes short-circuits the
//!    scan - that image is the partner
//! 2. Otherwise each enabled criterion computes its absolute delta and is
//!    gated by the caller's tolerance window
//! 3. An RGB image becomes a candidate only if **every** enabled criterion
//!    is within tolerance
//! 4. Among the collected candidates, a majority-of-attributes vote picks
//!    the closest one
//!
//! The search is O(|radiometric| x |rgb|) with no spatial or temporal index,
//! which is fine at CLI batch scale. The outer loop runs on rayon: each
//! radiometric image owns its candidate list and output slot, so the result
//! is deterministic for a fixed input order.

use super::{ImagePair, NOT_FOUND};
use crate::core::aggregate::DeltaAccumulator;
use crate::core::comparator;
use crate::core::tags::{NamedImage, TagAttribute};
use crate::events::{Event, EventSender, MatchEvent};
use rayon::prelude::*;

/// Tolerance windows for the metric matcher.
///
/// Each attribute is independently toggle-able; a `None` tolerance means the
/// attribute is not evaluated at all. With no criteria enabled no candidate
/// can ever qualify - the all-enabled-criteria gate is not vacuously true.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchCriteria {
    /// Maximum DateTimeOriginal delta, in seconds
    pub date_time_within: Option<f64>,
    /// Maximum GPSLatitude delta, in degrees
    pub latitude_within: Option<f64>,
    /// Maximum GPSLongitude delta, in degrees
    pub longitude_within: Option<f64>,
    /// Maximum GPSAltitude delta, in the source unit
    pub altitude_within: Option<f64>,
}

impl MatchCriteria {
    /// Tolerance for one attribute, if that criterion is enabled
    pub fn tolerance(&self, attr: TagAttribute) -> Option<f64> {
        match attr {
            TagAttribute::Altitude => self.altitude_within,
            TagAttribute::Latitude => self.latitude_within,
            TagAttribute::Longitude => self.longitude_within,
            TagAttribute::DateTime => self.date_time_within,
        }
    }

    /// Whether no criterion is enabled
    pub fn is_empty(&self) -> bool {
        TagAttribute::ALL.iter().all(|a| self.tolerance(*a).is_none())
    }
}

/// One evaluated, tolerance-gated delta on a candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateDelta {
    /// Absolute difference between the two attribute values
    pub delta: f64,
    /// Whether the delta fell inside the caller's tolerance window
    pub within: bool,
}

/// One RGB image considered as a partner for a radiometric image.
///
/// Carries only the deltas for criteria the caller enabled; attributes that
/// were not requested stay `None`.
#[derive(Debug, Clone, Default)]
pub struct PairCandidate {
    pub name: String,
    altitude: Option<CandidateDelta>,
    latitude: Option<CandidateDelta>,
    longitude: Option<CandidateDelta>,
    date_time: Option<CandidateDelta>,
}

impl PairCandidate {
    /// The recorded delta for one attribute, if it was evaluated
    pub fn delta(&self, attr: TagAttribute) -> Option<CandidateDelta> {
        match attr {
            TagAttribute::Altitude => self.altitude,
            TagAttribute::Latitude => self.latitude,
            TagAttribute::Longitude => self.longitude,
            TagAttribute::DateTime => self.date_time,
        }
    }

    fn set_delta(&mut self, attr: TagAttribute, delta: CandidateDelta) {
        match attr {
            TagAttribute::Altitude => self.altitude = Some(delta),
            TagAttribute::Latitude => self.latitude = Some(delta),
            TagAttribute::Longitude => self.longitude = Some(delta),
            TagAttribute::DateTime => self.date_time = Some(delta),
        }
    }
}

/// Pair each radiometric image with its best RGB partner.
///
/// Output order mirrors the input `radiometric` order. Images with no
/// qualifying candidate pair with the [`NOT_FOUND`] sentinel.
pub fn find_pairs(
    radiometric: &[NamedImage],
    rgb: &[NamedImage],
    criteria: &MatchCriteria,
) -> Vec<ImagePair> {
    tracing::debug!(
        radiometric = radiometric.len(),
        rgb = rgb.len(),
        "starting metric matching"
    );

    radiometric
        .par_iter()
        .map(|image| ImagePair {
            a: image.name.clone(),
            b: best_partner(image, rgb, criteria),
        })
        .collect()
}

/// [`find_pairs`] with start/completion events for UI layers
pub fn find_pairs_with_events(
    radiometric: &[NamedImage],
    rgb: &[NamedImage],
    criteria: &MatchCriteria,
    events: &EventSender,
) -> Vec<ImagePair> {
    events.send(Event::Match(MatchEvent::Started {
        radiometric: radiometric.len(),
        rgb: rgb.len(),
    }));

    let pairs = find_pairs(radiometric, rgb, criteria);

    let matched = pairs.iter().filter(|p| p.is_matched()).count();
    events.send(Event::Match(MatchEvent::Completed {
        matched,
        unmatched: pairs.len() - matched,
    }));

    pairs
}

/// Scan the RGB population for the best partner of one radiometric image.
fn best_partner(image: &NamedImage, rgb: &[NamedImage], criteria: &MatchCriteria) -> String {
    // Scratch accumulator local to this image; the matcher does not feed
    // any shared delta history.
    let mut scratch = DeltaAccumulator::new();
    let mut candidates = Vec::new();

    for other in rgb {
        if comparator::compare(&image.tags, &other.tags, &mut scratch).identical {
            // Exact match on all four monitored attributes - stop scanning.
            return other.name.clone();
        }

        if let Some(candidate) = evaluate_candidate(image, other, criteria) {
            candidates.push(candidate);
        }
    }

    match closest_candidate(candidates) {
        Some(candidate) => candidate.name,
        None => NOT_FOUND.to_string(),
    }
}

/// Evaluate one RGB image against every enabled criterion.
///
/// Returns a candidate only when all enabled criteria are within tolerance.
/// A criterion whose attribute is missing on either side cannot be verified
/// and disqualifies the candidate; with no criteria enabled nothing ever
/// qualifies.
fn evaluate_candidate(
    image: &NamedImage,
    other: &NamedImage,
    criteria: &MatchCriteria,
) -> Option<PairCandidate> {
    if criteria.is_empty() {
        return None;
    }

    let mut candidate = PairCandidate {
        name: other.name.clone(),
        ..Default::default()
    };

    for attr in TagAttribute::ALL {
        let Some(tolerance) = criteria.tolerance(attr) else {
            continue;
        };

        let (Some(a), Some(b)) = (image.tags.value(attr), other.tags.value(attr)) else {
            return None;
        };

        let delta = (a - b).abs();
        if delta > tolerance {
            return None;
        }
        candidate.set_delta(attr, CandidateDelta { delta, within: true });
    }

    Some(candidate)
}

/// Pick the closest candidate by a majority-of-attributes vote.
///
/// Starting from the first candidate, each challenger is compared attribute
/// by attribute over the deltas both sides actually carry: closer counts for
/// the challenger, farther against it. The challenger takes over when its
/// closer-count strictly exceeds its farther-count. This is a vote, not a
/// weighted distance, and it does not induce a strict partial order - when
/// votes tie across several challengers the result depends on candidate
/// order, which is an accepted property.
fn closest_candidate(candidates: Vec<PairCandidate>) -> Option<PairCandidate> {
    let mut iter = candidates.into_iter();
    let mut closest = iter.next()?;

    for challenger in iter {
        let mut closer = 0u32;
        let mut farther = 0u32;

        for attr in TagAttribute::ALL {
            if let (Some(c), Some(current)) = (challenger.delta(attr), closest.delta(attr)) {
                match c.delta.partial_cmp(&current.delta) {
                    Some(std::cmp::Ordering::Less) => closer += 1,
                    Some(std::cmp::Ordering::Greater) => farther += 1,
                    _ => {}
                }
            }
        }

        if closer > farther {
            closest = challenger;
        }
    }

    Some(closest)
}
