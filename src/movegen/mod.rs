//! Child-state generation.
//!
//! Expands one beam state for one gameweek into its candidate successors:
//! banking, single transfers, two-transfer combinations, caller-fixed
//! transfers, and wildcard/free-hit squad rebuilds.

pub mod chip;
pub mod cost;
pub mod fixed;
pub mod pool;
pub mod transfer;

use log::debug;

use crate::config::SearchConfig;
use crate::eval::EvalContext;
use crate::squad::{
    Action, BeamState, Chip, ChipPlan, Gameweek, GameweekPlan, PlayerId, Step, Transfer,
};

pub use cost::{chip_cost, transfer_cost, TransferCost};
pub use fixed::{apply_fixed, FixedTransfers};
pub use pool::{CandidateFilter, CandidatePools};

/// Read-only inputs for generating children.
pub struct MoveContext<'a> {
    pub eval: EvalContext<'a>,
    pub config: &'a SearchConfig,
    pub horizon: &'a [Gameweek],
    pub pools: &'a CandidatePools,
    /// Caller restrictions on incoming players, chip rebuilds included.
    pub filter: &'a CandidateFilter,
    pub fixed: &'a FixedTransfers,
    pub chips: &'a ChipPlan,
}

impl MoveContext<'_> {
    /// Horizon gameweeks from `gw` onward.
    pub fn remaining(&self, gw: Gameweek) -> &[Gameweek] {
        match self.horizon.iter().position(|&g| g == gw) {
            Some(i) => &self.horizon[i..],
            None => &[],
        }
    }

    /// Squad members ordered weakest first by remaining-horizon projection.
    pub fn weakest(&self, squad: &[PlayerId], gw: Gameweek, n: usize) -> Vec<PlayerId> {
        let remaining = self.remaining(gw);
        let mut scored: Vec<(PlayerId, f64)> = squad
            .iter()
            .map(|&id| (id, self.eval.projections.total(id, remaining)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.into_iter().take(n).map(|(id, _)| id).collect()
    }

    /// True when no club exceeds its cap in `squad`.
    pub fn clubs_ok(&self, squad: &[PlayerId]) -> bool {
        self.eval
            .catalog
            .club_counts(squad)
            .values()
            .all(|&n| n <= self.eval.rules.max_per_club)
    }
}

/// Builds the step for a gameweek in which `swaps` were made.
pub(crate) fn transfer_step(
    ctx: &MoveContext,
    state: &BeamState,
    gw: Gameweek,
    squad: Vec<PlayerId>,
    bank: i32,
    swaps: &[(PlayerId, PlayerId)],
    chip: Option<Chip>,
) -> Step {
    let cost = transfer_cost(
        swaps.len(),
        state.free_transfers,
        ctx.eval.rules,
        ctx.config.ft_value,
    );
    let free = state.free_transfers as usize;
    let transfers = swaps
        .iter()
        .enumerate()
        .map(|(i, &(out_id, in_id))| Transfer {
            out_id,
            in_id,
            gain: ctx.eval.projections.get(in_id, gw) - ctx.eval.projections.get(out_id, gw),
            is_free: i < free,
        })
        .collect();
    let gw_score = ctx.eval.evaluate(&squad, gw, chip);

    Step {
        plan: GameweekPlan {
            action: if swaps.is_empty() {
                Action::Bank
            } else {
                Action::Transfer
            },
            ft_available: state.free_transfers,
            ft_after: cost.ft_after,
            transfers,
            hit_cost: cost.hit_cost,
            gw_score,
            squad: squad.clone(),
            bank,
            chip,
        },
        squad,
        bank,
        ranking_adjustment: cost.ranking_adjustment,
        hits: cost.hits,
    }
}

/// The no-transfer child.
pub fn bank_child(ctx: &MoveContext, state: &BeamState, gw: Gameweek, chip: Option<Chip>) -> BeamState {
    let step = transfer_step(ctx, state, gw, state.squad.clone(), state.bank, &[], chip);
    state.advance(gw, step)
}

/// Generates every candidate successor of `state` for gameweek `gw`.
pub fn generate_children(ctx: &MoveContext, state: &BeamState, gw: Gameweek) -> Vec<BeamState> {
    let planned = ctx.chips.chip_for(gw);
    if let Some(c) = planned.filter(|c| c.rebuilds_squad()) {
        return chip::chip_children(ctx, state, gw, c);
    }

    let fixed = ctx.fixed.for_gameweek(gw);
    if !fixed.is_empty() {
        match fixed::fixed_children(ctx, state, gw, planned, fixed) {
            Some(children) => return children,
            None => debug!(
                "gw {}: fixed transfers not applicable to state (bank {}), falling back",
                gw, state.bank
            ),
        }
    }

    let mut children = vec![bank_child(ctx, state, gw, planned)];
    if ctx.config.max_transfers >= 1 {
        children.extend(transfer::single_transfers(ctx, state, gw, planned));
    }
    if ctx.config.max_transfers >= 2 {
        children.extend(transfer::double_transfers(ctx, state, gw, planned));
    }
    children
}

/// The single successor used by the hold baseline: fixed transfers when
/// they apply, otherwise a bank. Squad-rebuilding chips are not played.
pub fn hold_child(ctx: &MoveContext, state: &BeamState, gw: Gameweek) -> BeamState {
    let chip = ctx.chips.chip_for(gw).filter(|c| !c.rebuilds_squad());
    let fixed = ctx.fixed.for_gameweek(gw);
    if !fixed.is_empty() {
        if let Some((squad, bank)) = apply_fixed(&ctx.eval, &state.squad, state.bank, fixed) {
            let step = transfer_step(ctx, state, gw, squad, bank, fixed, chip);
            return state.advance(gw, step);
        }
    }
    bank_child(ctx, state, gw, chip)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A small league shared by the move generation tests.

    use super::*;
    use crate::squad::{Player, PlayerCatalog, Position, Projections, SquadRules};

    pub struct League {
        pub catalog: PlayerCatalog,
        pub projections: Projections,
        pub rules: SquadRules,
        pub config: SearchConfig,
        pub horizon: Vec<Gameweek>,
        pub fixed: FixedTransfers,
        pub chips: ChipPlan,
        pub squad: Vec<PlayerId>,
        pub filter: CandidateFilter,
        pub pools: CandidatePools,
    }

    impl League {
        /// Squad ids 1-15 (GK 1-2, DEF 3-7, MID 8-12, FWD 13-15), one
        /// club each, 5.0 apiece, projecting 2.0 every week.
        pub fn new(horizon: &[Gameweek]) -> Self {
            let mut league = League {
                catalog: PlayerCatalog::default(),
                projections: Projections::new(),
                rules: SquadRules::default(),
                config: SearchConfig::for_depth(crate::config::Depth::Standard),
                horizon: horizon.to_vec(),
                fixed: FixedTransfers::default(),
                chips: ChipPlan::new(),
                squad: Vec::new(),
                filter: CandidateFilter::default(),
                pools: CandidatePools::default(),
            };
            let layout = [
                (Position::Goalkeeper, 2),
                (Position::Defender, 5),
                (Position::Midfielder, 5),
                (Position::Forward, 3),
            ];
            let mut id = 1;
            for (position, n) in layout {
                for _ in 0..n {
                    league.add(id, position, id as u16, 50, 2.0);
                    league.squad.push(id);
                    id += 1;
                }
            }
            league
        }

        /// Adds a player projecting `points` in every horizon week.
        pub fn add(&mut self, id: PlayerId, position: Position, club: u16, cost: u32, points: f64) {
            let mut players: Vec<Player> = self.catalog.iter_sorted().cloned().collect();
            players.push(Player {
                id,
                name: format!("Player {}", id),
                position,
                club,
                cost,
                available: true,
            });
            self.catalog = PlayerCatalog::new(players);
            for &gw in &self.horizon {
                self.projections.insert(id, gw, points);
            }
        }

        /// Rebuilds pools after the market changes.
        pub fn refresh(&mut self) {
            self.pools = CandidatePools::build(
                &self.catalog,
                &self.projections,
                &self.horizon,
                &self.squad,
                &self.filter,
                &self.config,
            );
        }

        pub fn ctx(&self) -> MoveContext<'_> {
            MoveContext {
                eval: EvalContext::new(&self.catalog, &self.projections, &self.rules),
                config: &self.config,
                horizon: &self.horizon,
                pools: &self.pools,
                filter: &self.filter,
                fixed: &self.fixed,
                chips: &self.chips,
            }
        }

        pub fn root(&self, bank: i32, free_transfers: u8) -> BeamState {
            BeamState::initial(self.squad.clone(), bank, free_transfers)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::League;
    use super::*;
    use crate::squad::Position;

    #[test]
    fn bank_child_rolls_free_transfer() {
        let mut league = League::new(&[1, 2]);
        league.refresh();
        let ctx = league.ctx();
        let child = bank_child(&ctx, &league.root(0, 2), 1, None);
        assert_eq!(child.free_transfers, 3);
        let row = &child.plan[&1];
        assert_eq!(row.action, Action::Bank);
        assert_eq!(row.ft_available, 2);
        assert_eq!(row.ft_after, 3);
        assert_eq!(child.display_score, row.gw_score);
        assert_eq!(child.score, row.gw_score + league.config.ft_value);
    }

    #[test]
    fn generate_includes_bank_and_transfers() {
        let mut league = League::new(&[1]);
        league.add(100, Position::Midfielder, 20, 50, 6.0);
        league.refresh();
        let ctx = league.ctx();
        let children = generate_children(&ctx, &league.root(0, 1), 1);
        assert!(children.iter().any(|c| c.plan[&1].action == Action::Bank));
        assert!(children
            .iter()
            .any(|c| c.plan[&1].transfers.iter().any(|t| t.in_id == 100)));
        for c in &children {
            assert_eq!(c.squad.len(), 15);
            assert!(c.bank >= 0);
            assert!(ctx.clubs_ok(&c.squad));
        }
    }

    #[test]
    fn quick_depth_skips_pairs() {
        let mut league = League::new(&[1]);
        league.config = SearchConfig::for_depth(crate::config::Depth::Quick);
        league.add(100, Position::Midfielder, 20, 50, 6.0);
        league.add(101, Position::Forward, 21, 50, 6.0);
        league.refresh();
        let ctx = league.ctx();
        let children = generate_children(&ctx, &league.root(0, 1), 1);
        assert!(children.iter().all(|c| c.plan[&1].transfers.len() <= 1));
    }

    #[test]
    fn weakest_orders_by_remaining_projection() {
        let mut league = League::new(&[1, 2, 3]);
        league.projections.insert(5, 2, 0.0);
        league.projections.insert(5, 3, 0.0);
        league.projections.insert(9, 1, 0.0);
        league.refresh();
        let ctx = league.ctx();
        // From gw 2 player 5 is weakest; player 9's blank is in the past.
        assert_eq!(ctx.weakest(&league.squad, 2, 1), vec![5]);
        assert_eq!(ctx.remaining(2), &[2, 3]);
        assert!(ctx.remaining(7).is_empty());
    }

    #[test]
    fn hold_child_banks_without_fixed_transfers() {
        let mut league = League::new(&[1]);
        league.add(100, Position::Midfielder, 20, 50, 6.0);
        league.chips.schedule(Chip::Wildcard, 1).unwrap();
        league.refresh();
        let ctx = league.ctx();
        let held = hold_child(&ctx, &league.root(0, 1), 1);
        assert_eq!(held.squad, league.squad);
        assert_eq!(held.plan[&1].action, Action::Bank);
        assert_eq!(held.plan[&1].chip, None);
    }

    #[test]
    fn hold_child_applies_fixed_transfers() {
        let mut league = League::new(&[1]);
        league.add(100, Position::Midfielder, 20, 50, 6.0);
        league.fixed.add(1, 8, 100);
        league.refresh();
        let ctx = league.ctx();
        let held = hold_child(&ctx, &league.root(0, 1), 1);
        assert!(held.squad.contains(&100));
        assert!(!held.squad.contains(&8));
        assert_eq!(held.plan[&1].hit_cost, 0);
    }
}
