//! Squad-building and scoring rules.
//!
//! Passed into the search as a value so tests can swap in alternate
//! formation rules without touching global state.

use super::player::{Position, POSITION_COUNT};

/// Game rules the planner must respect.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadRules {
    /// Required squad members per position (GK, DEF, MID, FWD).
    pub squad_quota: [usize; POSITION_COUNT],
    /// Minimum starters per position.
    pub min_starters: [usize; POSITION_COUNT],
    /// Maximum starters per position.
    pub max_starters: [usize; POSITION_COUNT],
    /// Size of the starting lineup.
    pub starting_size: usize,
    /// Maximum squad members from one club.
    pub max_per_club: usize,
    /// Cap on banked free transfers.
    pub max_free_transfers: u8,
    /// Points deducted per transfer beyond the free allowance.
    pub hit_cost: u32,
}

impl Default for SquadRules {
    fn default() -> Self {
        SquadRules {
            squad_quota: [2, 5, 5, 3],
            min_starters: [1, 3, 2, 1],
            max_starters: [1, 5, 5, 3],
            starting_size: 11,
            max_per_club: 3,
            max_free_transfers: 5,
            hit_cost: 4,
        }
    }
}

impl SquadRules {
    /// Total squad size implied by the quota.
    pub fn squad_size(&self) -> usize {
        self.squad_quota.iter().sum()
    }

    pub fn quota(&self, position: Position) -> usize {
        self.squad_quota[position.index()]
    }

    /// Slot order used when building a squad from scratch.
    pub fn slot_order(&self) -> Vec<Position> {
        super::player::ALL_POSITIONS
            .iter()
            .flat_map(|&p| std::iter::repeat(p).take(self.quota(p)))
            .collect()
    }
}
