//! Picks distinct plans from the final beam.

use crate::squad::BeamState;

/// Chooses up to `count` states from `beam` (best first). A candidate is
/// skipped when its move set differs from an already chosen plan in fewer
/// than `min_difference` moves. Skipped states backfill the result if too
/// few distinct plans exist.
pub fn select_diverse(beam: &[BeamState], count: usize, min_difference: usize) -> Vec<&BeamState> {
    let moves: Vec<_> = beam.iter().map(BeamState::move_set).collect();
    let mut chosen: Vec<usize> = Vec::with_capacity(count);

    for i in 0..beam.len() {
        if chosen.len() == count {
            break;
        }
        let distinct = chosen
            .iter()
            .all(|&j| moves[i].symmetric_difference(&moves[j]).count() >= min_difference);
        if distinct {
            chosen.push(i);
        }
    }

    for i in 0..beam.len() {
        if chosen.len() >= count {
            break;
        }
        if !chosen.contains(&i) {
            chosen.push(i);
        }
    }

    chosen.into_iter().map(|i| &beam[i]).collect()
}
