//! # Scorer Module
//!
//! Scores a produced pairing against a trusted reference pairing.
//!
//! A produced pair counts as correct only when the exact `(a, b)` tuple
//! exists in the reference set - order-sensitive, exact string match, no
//! partial credit.

use crate::core::matcher::ImagePair;
use crate::error::AggregateError;
use serde::{Deserialize, Serialize};

/// Accuracy of a produced pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Percentage of correct pairs, rendered as e.g. `"87.5 %"`
    pub accuracy: String,
    /// Every produced pair with no exact counterpart in the reference
    pub incorrect_pairs: Vec<ImagePair>,
}

/// Score `produced` against `reference`.
///
/// Fails with [`AggregateError::NoProducedPairs`] when `produced` is empty;
/// the caller must guard rather than accept a division by zero.
pub fn score(
    reference: &[ImagePair],
    produced: &[ImagePair],
) -> Result<ScoringResult, AggregateError> {
    if produced.is_empty() {
        return Err(AggregateError::NoProducedPairs);
    }

    let incorrect_pairs: Vec<ImagePair> = produced
        .iter()
        .filter(|pair| !reference.contains(pair))
        .cloned()
        .collect();

    let correct = produced.len() - incorrect_pairs.len();
    let accuracy = 100.0 * correct as f64 / produced.len() as f64;

    Ok(ScoringResult {
        accuracy: format!("{:.1} %", accuracy),
        incorrect_pairs,
    })
}
