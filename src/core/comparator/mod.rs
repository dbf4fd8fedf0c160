//! # Comparator Module
//!
//! Pairwise comparison of two tag sets.
//!
//! ## How It Works
//! 1. Each of the four monitored attributes is compared by strict value
//!    equality - no tolerance is applied at this level
//! 2. `identical` is the AND across all four
//! 3. For every differing attribute present on both sides, the absolute
//!    delta is appended to the caller's [`DeltaAccumulator`] and described
//!    in the `difference` string
//!
//! An attribute absent on either side is silently skipped: it contributes
//! neither to the difference string nor to any delta series.

use crate::core::aggregate::DeltaAccumulator;
use crate::core::tags::{TagAttribute, TagSet};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Verdict of comparing two tag sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagComparison {
    /// Short display name of the first image
    pub img1: String,
    /// Short display name of the second image
    pub img2: String,
    /// True iff all four monitored attributes are equal by strict value
    /// comparison
    pub identical: bool,
    /// Human-readable concatenation of per-attribute delta descriptions,
    /// present only when the pair differs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<String>,
}

/// Compare two tag sets and record every computed delta into `deltas`.
///
/// Delta for the timestamp attribute is in seconds; GPS deltas are in the
/// attribute's native unit. Latitude/longitude deltas are naive differences
/// with no antimeridian or pole wrap handling.
pub fn compare(a: &TagSet, b: &TagSet, deltas: &mut DeltaAccumulator) -> TagComparison {
    let identical = TagAttribute::ALL
        .iter()
        .all(|attr| a.value(*attr) == b.value(*attr));

    let difference = if identical {
        None
    } else {
        let mut diff = String::new();
        for attr in TagAttribute::ALL {
            if a.value(attr) == b.value(attr) {
                continue;
            }
            if let (Some(va), Some(vb)) = (a.value(attr), b.value(attr)) {
                let delta = (va - vb).abs();
                deltas.record(attr, delta);
                // Unwrap is fine: writing into a String cannot fail.
                write!(diff, "{}: [{}] vs [{}]. Delta: [{:.10}]; ", attr, va, vb, delta).unwrap();
            }
        }
        Some(diff)
    };

    TagComparison {
        img1: a.short_name(),
        img2: b.short_name(),
        identical,
        difference,
    }
}
