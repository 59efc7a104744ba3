//! Caller-fixed transfers.
//!
//! A fixed transfer is a swap the caller has already decided to make in a
//! given gameweek. Every path makes it; the search may only add to it.

use std::collections::BTreeMap;

use crate::eval::EvalContext;
use crate::squad::{BeamState, Chip, Gameweek, PlayerId};

use super::{transfer::extend_with_single, transfer_step, MoveContext};

/// Fixed swaps keyed by gameweek, in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedTransfers {
    by_gameweek: BTreeMap<Gameweek, Vec<(PlayerId, PlayerId)>>,
}

impl FixedTransfers {
    pub fn add(&mut self, gw: Gameweek, out_id: PlayerId, in_id: PlayerId) {
        self.by_gameweek.entry(gw).or_default().push((out_id, in_id));
    }

    pub fn for_gameweek(&self, gw: Gameweek) -> &[(PlayerId, PlayerId)] {
        self.by_gameweek.get(&gw).map_or(&[][..], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gameweek, PlayerId, PlayerId)> + '_ {
        self.by_gameweek
            .iter()
            .flat_map(|(&gw, moves)| moves.iter().map(move |&(o, i)| (gw, o, i)))
    }
}

/// Applies `moves` in order to `squad`. Returns the new squad and bank, or
/// `None` if any move is illegal for this squad.
pub fn apply_fixed(
    eval: &EvalContext,
    squad: &[PlayerId],
    bank: i32,
    moves: &[(PlayerId, PlayerId)],
) -> Option<(Vec<PlayerId>, i32)> {
    let catalog = eval.catalog;
    let mut squad = squad.to_vec();
    let mut bank = bank;

    for &(out_id, in_id) in moves {
        let slot = squad.iter().position(|&id| id == out_id)?;
        let incoming = catalog.get(in_id)?;
        if squad.contains(&in_id) || catalog.position(out_id) != Some(incoming.position) {
            return None;
        }
        bank += catalog.cost(out_id) as i32 - incoming.cost as i32;
        if bank < 0 {
            return None;
        }
        squad[slot] = in_id;
    }

    let cap = eval.rules.max_per_club;
    if catalog.club_counts(&squad).values().any(|&n| n > cap) {
        return None;
    }
    Some((squad, bank))
}

/// Children for a gameweek with fixed transfers: the fixed moves alone,
/// plus single transfers layered on top while the transfer limit allows.
/// `None` when the fixed moves cannot be applied to this state.
pub(crate) fn fixed_children(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Option<Chip>,
    moves: &[(PlayerId, PlayerId)],
) -> Option<Vec<BeamState>> {
    let (squad, bank) = apply_fixed(&ctx.eval, &state.squad, state.bank, moves)?;

    let mut children = Vec::new();
    if ctx.config.max_transfers > moves.len() {
        children = extend_with_single(ctx, state, gw, chip, &squad, bank, moves);
    }
    let step = transfer_step(ctx, state, gw, squad, bank, moves, chip);
    children.insert(0, state.advance(gw, step));
    Some(children)
}
