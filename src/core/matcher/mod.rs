//! # Matcher Module
//!
//! Pairs the radiometric image population against the RGB one.
//!
//! Two strategies:
//! - `pattern` - filename-suffix convention over a strictly alternating
//!   file order; no metadata is consulted
//! - `metric` - nearest-neighbor search over capture metadata under
//!   caller-supplied tolerance windows

mod metric;
mod pattern;

pub use metric::{find_pairs, find_pairs_with_events, CandidateDelta, MatchCriteria, PairCandidate};
pub use pattern::{matches_pattern, pairs_from_order};

use serde::{Deserialize, Serialize};

/// Placeholder partner name for a radiometric image no candidate matched
pub const NOT_FOUND: &str = "not found";

/// Which sensor an image (or slot in an alternating listing) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageRole {
    Rgb,
    Radiometric,
}

/// One matched pair: a radiometric image and its RGB partner.
///
/// `b` is the literal [`NOT_FOUND`] string when no candidate satisfied all
/// requested tolerances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub a: String,
    pub b: String,
}

impl ImagePair {
    /// Whether a partner was actually found for this pair
    pub fn is_matched(&self) -> bool {
        self.b != NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_pairs_are_unmatched() {
        let pair = ImagePair {
            a: "thermal_1.jpg".to_string(),
            b: NOT_FOUND.to_string(),
        };
        assert!(!pair.is_matched());
    }

    #[test]
    fn pairs_round_trip_through_json() {
        let pairs = vec![
            ImagePair {
                a: "thermal_1.jpg".to_string(),
                b: "rgb_1.jpg".to_string(),
            },
            ImagePair {
                a: "thermal_2.jpg".to_string(),
                b: NOT_FOUND.to_string(),
            },
        ];

        let json = serde_json::to_string(&pairs).unwrap();
        let parsed: Vec<ImagePair> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pairs);
    }
}
