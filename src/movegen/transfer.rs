//! Single and two-transfer branches.
//!
//! Sellers are the squad's weakest players over the remaining horizon.
//! Buyers come from the candidate pools and must fit the bank, the
//! position, and the per-club cap.

use crate::squad::{BeamState, Chip, Gameweek, PlayerId};

use super::{transfer_step, MoveContext};

/// Returns `squad` with `out_id` replaced in place by `in_id` and the
/// resulting bank. No legality checks.
fn swap(
    ctx: &MoveContext,
    squad: &[PlayerId],
    bank: i32,
    out_id: PlayerId,
    in_id: PlayerId,
) -> (Vec<PlayerId>, i32) {
    let catalog = ctx.eval.catalog;
    let bank = bank + catalog.cost(out_id) as i32 - catalog.cost(in_id) as i32;
    let swapped = squad
        .iter()
        .map(|&id| if id == out_id { in_id } else { id })
        .collect();
    (swapped, bank)
}

/// Like `swap`, but `None` when the bank goes negative or a club exceeds
/// its cap.
fn try_swap(
    ctx: &MoveContext,
    squad: &[PlayerId],
    bank: i32,
    out_id: PlayerId,
    in_id: PlayerId,
) -> Option<(Vec<PlayerId>, i32)> {
    let (swapped, bank) = swap(ctx, squad, bank, out_id, in_id);
    (bank >= 0 && ctx.clubs_ok(&swapped)).then_some((swapped, bank))
}

/// Off-squad candidates for the seller's position this gameweek.
fn buyers<'a>(
    ctx: &'a MoveContext<'a>,
    squad: &'a [PlayerId],
    out_id: PlayerId,
    gw: Gameweek,
) -> impl Iterator<Item = PlayerId> + 'a {
    let position = ctx.eval.catalog.position(out_id);
    position
        .into_iter()
        .flat_map(move |pos| ctx.pools.candidates(pos, gw))
        .filter(move |id| !squad.contains(id))
}

/// Single transfers made on top of `squad` and `bank`, after `prior` swaps
/// already made this gameweek. The cost model sees all swaps together.
/// Players moved by `prior` are neither sold nor bought back again.
pub(crate) fn extend_with_single(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Option<Chip>,
    squad: &[PlayerId],
    bank: i32,
    prior: &[(PlayerId, PlayerId)],
) -> Vec<BeamState> {
    let mut children = Vec::new();
    let bought = |id: PlayerId| prior.iter().any(|&(_, in_id)| in_id == id);
    let sold = |id: PlayerId| prior.iter().any(|&(out_id, _)| out_id == id);
    for out_id in ctx.weakest(squad, gw, ctx.config.sell_candidates) {
        if bought(out_id) {
            continue;
        }
        for in_id in buyers(ctx, squad, out_id, gw).filter(|&id| !sold(id)) {
            let Some((next, next_bank)) = try_swap(ctx, squad, bank, out_id, in_id) else {
                continue;
            };
            let mut swaps = prior.to_vec();
            swaps.push((out_id, in_id));
            let step = transfer_step(ctx, state, gw, next, next_bank, &swaps, chip);
            children.push(state.advance(gw, step));
        }
    }
    children
}

/// One-transfer children of `state`.
pub fn single_transfers(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Option<Chip>,
) -> Vec<BeamState> {
    extend_with_single(ctx, state, gw, chip, &state.squad, state.bank, &[])
}

/// Two-transfer children of `state` from pairs of the weakest sellers.
pub fn double_transfers(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Option<Chip>,
) -> Vec<BeamState> {
    let squad = &state.squad;
    let sellers = ctx.weakest(squad, gw, ctx.config.multi_sell_candidates);
    let options: Vec<Vec<PlayerId>> = sellers
        .iter()
        .map(|&out_id| {
            buyers(ctx, squad, out_id, gw)
                .take(ctx.config.multi_buy_candidates)
                .collect()
        })
        .collect();

    let mut children = Vec::new();
    for i in 0..sellers.len() {
        for j in (i + 1)..sellers.len() {
            let (out_a, out_b) = (sellers[i], sellers[j]);
            for &in_a in &options[i] {
                // Bank and club cap are checked once both swaps are in.
                let (first, bank) = swap(ctx, squad, state.bank, out_a, in_a);
                for &in_b in &options[j] {
                    if in_a == in_b {
                        continue;
                    }
                    let Some((next, next_bank)) = try_swap(ctx, &first, bank, out_b, in_b) else {
                        continue;
                    };
                    let swaps = [(out_a, in_a), (out_b, in_b)];
                    let step = transfer_step(ctx, state, gw, next, next_bank, &swaps, chip);
                    children.push(state.advance(gw, step));
                }
            }
        }
    }
    children
}
