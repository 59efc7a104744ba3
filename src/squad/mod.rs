//! Squad representation and game-state types.
//!
//! Contains the player catalog, projections, rules, chips, and the beam
//! state that the search clones and extends.

pub mod chip;
pub mod player;
pub mod projection;
pub mod rules;
pub mod state;

pub use chip::{Chip, ChipPlan};
pub use player::{
    ClubId, Gameweek, Player, PlayerCatalog, PlayerId, Position, ALL_POSITIONS, POSITION_COUNT,
};
pub use projection::Projections;
pub use rules::SquadRules;
pub use state::{Action, BeamState, GameweekPlan, Step, Transfer};
