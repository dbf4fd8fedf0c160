//! Filename-pattern pairing over an alternating file order.

use super::{ImagePair, ImageRole};

/// Check that an alternating file listing follows the expected
/// filename-suffix convention.
///
/// `files` must already be sorted into pair order: even index is the first
/// image of each pair, odd index the second. That precondition comes from
/// the directory-listing layer and is not verified here.
///
/// For every consecutive pair, the file in the `role_of_first` slot must end
/// with that role's pattern and its partner with the other pattern.
///
/// Carried behavior: the returned verdict is the one of the *last* pair
/// evaluated, not an AND across all pairs. Pairs before the last one do not
/// affect the result. Downstream consumers rely on the observable contract,
/// so this is kept as-is rather than silently corrected.
pub fn matches_pattern(
    files: &[String],
    role_of_first: ImageRole,
    pattern_rgb: &str,
    pattern_radiometric: &str,
) -> bool {
    let mut valid = false;

    for pair in files.chunks_exact(2) {
        let (first_pattern, second_pattern) = match role_of_first {
            ImageRole::Radiometric => (pattern_radiometric, pattern_rgb),
            ImageRole::Rgb => (pattern_rgb, pattern_radiometric),
        };

        let first_matches = pair[0].ends_with(first_pattern);
        let second_matches = pair[1].ends_with(second_pattern);
        valid = first_matches && second_matches;
    }

    valid
}

/// Build pairs from an alternating file listing: each even-indexed file is
/// paired with its odd-indexed successor. A trailing unpaired file is
/// dropped.
pub fn pairs_from_order(files: &[String]) -> Vec<ImagePair> {
    files
        .chunks_exact(2)
        .map(|pair| ImagePair {
            a: pair[0].clone(),
            b: pair[1].clone(),
        })
        .collect()
}
