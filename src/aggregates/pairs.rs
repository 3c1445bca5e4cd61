use super::types::PosturalPair;
use crate::metrics::PressureDrop;
use crate::models::{EnrichedReading, Posture};

/// Pairs each standing reading with the entry appended immediately before it,
/// when that entry is a lying reading.
///
/// Adjacency is by insertion index, and the flag is recomputed from the pair
/// alone, so it can disagree with the standing reading's stored flag when the
/// history was not appended in time order.
pub fn find_postural_pairs(history: &[EnrichedReading]) -> Vec<PosturalPair> {
    history
        .windows(2)
        .filter(|w| {
            w[0].reading.posture == Posture::Lying && w[1].reading.posture == Posture::Standing
        })
        .map(|w| {
            let drop = PressureDrop::between(&w[0].reading, &w[1].reading);
            PosturalPair {
                lying: w[0].clone(),
                standing: w[1].clone(),
                systolic_drop: drop.systolic,
                diastolic_drop: drop.diastolic,
                orthostatic: drop.is_orthostatic(),
            }
        })
        .collect()
}
