//! Score → archetype resolution.
//!
//! The two bipolar differences pick a quadrant; a high overall total pushes
//! the pick two slots further along the archetype list.

use evidence_content::domain::model::{Archetype, ScoreVector};

/// Totals strictly above this value intensify the result.
pub const INTENSITY_THRESHOLD: i64 = 25;

/// How far an intense result is shifted along the archetype list.
pub const INTENSITY_SHIFT: usize = 2;

/// Quadrant index for a score vector. Ties on either axis take the
/// non-positive branch.
///
/// | chaos - order | emotion - logic | quadrant |
/// |---|---|---|
/// | > 0 | > 0 | 0 |
/// | > 0 | ≤ 0 | 1 |
/// | ≤ 0 | > 0 | 2 |
/// | ≤ 0 | ≤ 0 | 3 |
#[must_use]
pub fn quadrant(scores: &ScoreVector) -> usize {
    match (scores.chaos_vs_order() > 0, scores.emotion_vs_logic() > 0) {
        (true, true) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    }
}

/// Index of the archetype selected for `scores` out of `archetype_count`,
/// or `None` when there are no archetypes.
#[must_use]
pub fn archetype_index(scores: &ScoreVector, archetype_count: usize) -> Option<usize> {
    let last = archetype_count.checked_sub(1)?;
    let mut index = quadrant(scores);
    if scores.total() > INTENSITY_THRESHOLD {
        index = (index + INTENSITY_SHIFT).min(last);
    }
    Some(index.min(last))
}

/// The archetype selected for `scores`, or `None` when the list is empty.
#[must_use]
pub fn resolve<'a>(scores: &ScoreVector, archetypes: &'a [Archetype]) -> Option<&'a Archetype> {
    archetype_index(scores, archetypes.len()).and_then(|i| archetypes.get(i))
}
