//! Gameweek-by-gameweek beam search over transfer plans.
//!
//! Each gameweek expands every state in the beam, collapses states that
//! reach the same squad with the same free transfers, and keeps the best
//! `beam_width` by internal score. Expansion runs on the rayon pool; the
//! collect keeps beam order so the result matches a sequential run.

use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;

use crate::movegen::{generate_children, hold_child, MoveContext};
use crate::squad::{BeamState, Gameweek};

/// All children of the beam for `gw`, in beam order.
pub fn expand(ctx: &MoveContext, beam: &[BeamState], gw: Gameweek) -> Vec<BeamState> {
    let per_state: Vec<Vec<BeamState>> = if ctx.config.parallel {
        beam.par_iter()
            .map(|state| generate_children(ctx, state, gw))
            .collect()
    } else {
        beam.iter()
            .map(|state| generate_children(ctx, state, gw))
            .collect()
    };
    per_state.into_iter().flatten().collect()
}

/// Keeps the highest internal score per (squad, free transfers). The
/// earlier state wins a tie.
pub fn dedup(states: Vec<BeamState>) -> Vec<BeamState> {
    let mut index: HashMap<_, usize> = HashMap::with_capacity(states.len());
    let mut kept: Vec<BeamState> = Vec::with_capacity(states.len());
    for state in states {
        match index.get(&state.dedup_key()) {
            Some(&i) => {
                if state.score > kept[i].score {
                    kept[i] = state;
                }
            }
            None => {
                index.insert(state.dedup_key(), kept.len());
                kept.push(state);
            }
        }
    }
    kept
}

/// Dedup, stable sort by internal score descending, truncate to `width`.
pub fn prune(states: Vec<BeamState>, width: usize) -> Vec<BeamState> {
    let mut states = dedup(states);
    states.sort_by(|a, b| b.score.total_cmp(&a.score));
    states.truncate(width);
    states
}

/// Runs the search over the whole horizon and returns the final beam,
/// best first.
pub fn run_beam(ctx: &MoveContext, root: BeamState) -> Vec<BeamState> {
    let mut beam = vec![root];
    for &gw in ctx.horizon {
        let children = expand(ctx, &beam, gw);
        let generated = children.len();
        beam = prune(children, ctx.config.beam_width);
        debug!(
            "gw {}: {} children, {} kept, best {:.2}",
            gw,
            generated,
            beam.len(),
            beam.first().map_or(0.0, |s| s.score)
        );
    }
    beam
}

/// Replays the horizon making only fixed transfers.
pub fn run_hold(ctx: &MoveContext, root: BeamState) -> BeamState {
    ctx.horizon
        .iter()
        .fold(root, |state, &gw| hold_child(ctx, &state, gw))
}
