//! Beam search state.
//!
//! A `BeamState` is one partial transfer plan: the squad and bank carried
//! into the next gameweek, the free transfers banked, both scores, and the
//! per-gameweek record. States are values; children are built from clones
//! and a state is never mutated once it has entered a beam.

use std::collections::{BTreeMap, HashSet};

use super::chip::Chip;
use super::player::{Gameweek, PlayerId};

/// What a manager did in a gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Bank,
    Transfer,
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Action::Bank => "bank",
            Action::Transfer => "transfer",
        }
    }
}

/// A single swap recorded in a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub out_id: PlayerId,
    pub in_id: PlayerId,
    /// Projection of the incoming player minus the outgoing one for the gameweek.
    pub gain: f64,
    /// True when covered by a free transfer.
    pub is_free: bool,
}

/// Everything that happened in one gameweek of a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct GameweekPlan {
    pub action: Action,
    pub ft_available: u8,
    pub ft_after: u8,
    pub transfers: Vec<Transfer>,
    pub hit_cost: u32,
    /// Projected points for the gameweek before hit deductions.
    pub gw_score: f64,
    /// Squad fielded this gameweek.
    pub squad: Vec<PlayerId>,
    /// Bank after this gameweek's transfers, in tenths.
    pub bank: i32,
    pub chip: Option<Chip>,
}

/// The outcome of one branch: the gameweek row plus what carries forward.
#[derive(Debug, Clone)]
pub struct Step {
    pub plan: GameweekPlan,
    /// Squad carried into the next gameweek.
    pub squad: Vec<PlayerId>,
    /// Bank carried into the next gameweek, in tenths.
    pub bank: i32,
    /// Ranking-only adjustment for free-transfer value.
    pub ranking_adjustment: f64,
    /// Number of hits taken.
    pub hits: u32,
}

/// A partial plan in the transfer beam.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamState {
    pub squad: Vec<PlayerId>,
    /// Bank in tenths of a currency unit.
    pub bank: i32,
    pub free_transfers: u8,
    /// Internal score, used only for ranking.
    pub score: f64,
    /// Projected points minus hit deductions.
    pub display_score: f64,
    pub plan: BTreeMap<Gameweek, GameweekPlan>,
    pub hits: u32,
}

impl BeamState {
    /// Creates the root state with zero accumulated score.
    pub fn initial(squad: Vec<PlayerId>, bank: i32, free_transfers: u8) -> Self {
        BeamState {
            squad,
            bank,
            free_transfers,
            score: 0.0,
            display_score: 0.0,
            plan: BTreeMap::new(),
            hits: 0,
        }
    }

    /// Builds the child reached by taking `step` in gameweek `gw`.
    pub fn advance(&self, gw: Gameweek, step: Step) -> BeamState {
        let Step {
            plan,
            squad,
            bank,
            ranking_adjustment,
            hits,
        } = step;
        let net = plan.gw_score - plan.hit_cost as f64;

        let mut child = self.clone();
        child.squad = squad;
        child.bank = bank;
        child.free_transfers = plan.ft_after;
        child.display_score += net;
        child.score += net + ranking_adjustment;
        child.hits += hits;
        child.plan.insert(gw, plan);
        child
    }

    /// Deduplication key: sorted squad ids and banked free transfers.
    pub fn dedup_key(&self) -> (Vec<PlayerId>, u8) {
        let mut ids = self.squad.clone();
        ids.sort_unstable();
        (ids, self.free_transfers)
    }

    /// All (out, in) pairs across the plan.
    pub fn move_set(&self) -> HashSet<(PlayerId, PlayerId)> {
        self.plan
            .values()
            .flat_map(|p| p.transfers.iter().map(|t| (t.out_id, t.in_id)))
            .collect()
    }
}
