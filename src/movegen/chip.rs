//! Wildcard and free-hit weeks.
//!
//! These chips bypass transfer logic: the squad optimizer rebuilds the
//! whole squad within the current squad value plus bank. A wildcard keeps
//! the new squad; a free hit fields it for one gameweek and the plan
//! carries on with the squad it had before.

use std::slice;

use log::warn;

use crate::search::squad_builder::{build_squads, BuiltSquad};
use crate::squad::{Action, BeamState, Chip, Gameweek, GameweekPlan, PlayerId, Step, Transfer};

use super::{chip_cost, MoveContext};

/// Children for a gameweek in which `chip` rebuilds the squad.
pub(crate) fn chip_children(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Chip,
) -> Vec<BeamState> {
    let objective = match chip {
        Chip::Wildcard => ctx.remaining(gw),
        _ => slice::from_ref(&gw),
    };
    let value = ctx.eval.catalog.squad_value(&state.squad) as i32;
    let budget = (value + state.bank).max(0) as u32;

    let built = build_squads(
        &ctx.eval,
        &state.squad,
        ctx.filter,
        budget,
        objective,
        ctx.config,
    );
    if built.is_empty() {
        warn!("gw {}: no legal {} squad within {}, keeping squad", gw, chip, budget);
        let unchanged = BuiltSquad {
            squad: state.squad.clone(),
            bank: state.bank,
            score: 0.0,
        };
        return vec![chip_child(ctx, state, gw, chip, unchanged)];
    }

    built
        .into_iter()
        .map(|b| chip_child(ctx, state, gw, chip, b))
        .collect()
}

/// Pairs departures with arrivals of the same position. Departures keep
/// the old squad's order; each takes the first unused arrival.
fn pair_moves(ctx: &MoveContext, old: &[PlayerId], new: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let catalog = ctx.eval.catalog;
    let mut arrivals: Vec<PlayerId> = new.iter().copied().filter(|id| !old.contains(id)).collect();
    let mut moves = Vec::new();
    for &out_id in old.iter().filter(|id| !new.contains(id)) {
        let position = catalog.position(out_id);
        if let Some(i) = arrivals.iter().position(|&id| catalog.position(id) == position) {
            moves.push((out_id, arrivals.remove(i)));
        }
    }
    moves
}

fn chip_child(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    chip: Chip,
    built: BuiltSquad,
) -> BeamState {
    let moves = pair_moves(ctx, &state.squad, &built.squad);
    let fielded: Vec<PlayerId> = state
        .squad
        .iter()
        .map(|&id| {
            moves
                .iter()
                .find(|&&(out_id, _)| out_id == id)
                .map_or(id, |&(_, in_id)| in_id)
        })
        .collect();
    let transfers = moves
        .iter()
        .map(|&(out_id, in_id)| Transfer {
            out_id,
            in_id,
            gain: ctx.eval.projections.get(in_id, gw) - ctx.eval.projections.get(out_id, gw),
            is_free: true,
        })
        .collect();

    let cost = chip_cost(state.free_transfers);
    let (squad, bank) = match chip {
        Chip::FreeHit => (state.squad.clone(), state.bank),
        _ => (fielded.clone(), built.bank),
    };
    let step = Step {
        plan: GameweekPlan {
            action: if moves.is_empty() {
                Action::Bank
            } else {
                Action::Transfer
            },
            ft_available: state.free_transfers,
            ft_after: cost.ft_after,
            transfers,
            hit_cost: cost.hit_cost,
            gw_score: ctx.eval.evaluate(&fielded, gw, Some(chip)),
            squad: fielded,
            bank: built.bank,
            chip: Some(chip),
        },
        squad,
        bank,
        ranking_adjustment: cost.ranking_adjustment,
        hits: cost.hits,
    };
    state.advance(gw, step)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::League;
    use super::*;
    use crate::squad::{Player, PlayerCatalog, Position};

    fn league_with_star() -> League {
        let mut league = League::new(&[1, 2]);
        league.add(100, Position::Midfielder, 20, 50, 9.0);
        league.refresh();
        league
    }

    #[test]
    fn wildcard_rebuilds_and_carries_forward() {
        let league = league_with_star();
        let ctx = league.ctx();
        let root = league.root(5, 2);
        let children = chip_children(&ctx, &root, 1, Chip::Wildcard);
        assert!(!children.is_empty());
        for child in &children {
            let row = &child.plan[&1];
            assert_eq!(row.chip, Some(Chip::Wildcard));
            assert_eq!(row.action, Action::Transfer);
            assert_eq!(row.transfers.len(), 1);
            assert_eq!(row.transfers[0].in_id, 100);
            assert!(row.transfers[0].is_free);
            assert_eq!(row.hit_cost, 0);
            assert_eq!(row.ft_available, 2);
            assert_eq!(row.ft_after, 2);
            assert_eq!(child.free_transfers, 2);
            assert!(child.squad.contains(&100));
            assert_eq!(child.squad, row.squad);
            assert_eq!(child.bank, 5);
            // No ranking adjustment in chip weeks.
            assert_eq!(child.score, child.display_score);
        }
    }

    #[test]
    fn free_hit_reverts_after_the_week() {
        let league = league_with_star();
        let ctx = league.ctx();
        let root = league.root(5, 1);
        let children = chip_children(&ctx, &root, 1, Chip::FreeHit);
        assert!(!children.is_empty());
        for child in &children {
            let row = &child.plan[&1];
            assert!(row.squad.contains(&100));
            assert_eq!(row.chip, Some(Chip::FreeHit));
            assert_eq!(child.squad, league.squad);
            assert_eq!(child.bank, 5);
            assert_eq!(child.free_transfers, 1);
        }
    }

    #[test]
    fn excluded_players_are_not_bought() {
        let mut league = league_with_star();
        league.filter.excluded.insert(100);
        league.refresh();
        let ctx = league.ctx();
        for chip in [Chip::Wildcard, Chip::FreeHit] {
            let children = chip_children(&ctx, &league.root(5, 1), 1, chip);
            assert!(!children.is_empty());
            for child in &children {
                let row = &child.plan[&1];
                assert!(!row.squad.contains(&100));
                assert!(row.transfers.iter().all(|t| t.in_id != 100));
            }
        }
    }

    #[test]
    fn fielded_squad_replaces_in_place() {
        let league = league_with_star();
        let ctx = league.ctx();
        let children = chip_children(&ctx, &league.root(0, 1), 1, Chip::Wildcard);
        let row = &children[0].plan[&1];
        let out_id = row.transfers[0].out_id;
        let slot = league.squad.iter().position(|&id| id == out_id).unwrap();
        assert_eq!(row.squad[slot], 100);
    }

    #[test]
    fn empty_optimizer_keeps_squad() {
        let mut league = League::new(&[1, 2]);
        // With keeper 1 unavailable there is no legal pair of keepers.
        let players: Vec<Player> = league
            .catalog
            .iter_sorted()
            .cloned()
            .map(|mut p| {
                p.available = p.id != 1;
                p
            })
            .collect();
        league.catalog = PlayerCatalog::new(players);
        league.refresh();
        let ctx = league.ctx();
        let children = chip_children(&ctx, &league.root(3, 1), 1, Chip::Wildcard);
        assert_eq!(children.len(), 1);
        let row = &children[0].plan[&1];
        assert_eq!(row.action, Action::Bank);
        assert_eq!(row.chip, Some(Chip::Wildcard));
        assert!(row.transfers.is_empty());
        assert_eq!(children[0].squad, league.squad);
        assert_eq!(children[0].bank, 3);
    }

    #[test]
    fn pairs_by_position() {
        let mut league = League::new(&[1]);
        league.add(100, Position::Forward, 20, 50, 1.0);
        league.add(101, Position::Goalkeeper, 21, 50, 1.0);
        let ctx = league.ctx();
        let mut new = league.squad.clone();
        new.retain(|&id| id != 2 && id != 15);
        new.extend([100, 101]);
        assert_eq!(
            pair_moves(&ctx, &league.squad, &new),
            vec![(2, 101), (15, 100)]
        );
    }
}
