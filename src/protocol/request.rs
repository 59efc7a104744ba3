//! Solve requests.
//!
//! A request is one JSON document carrying the squad, the player catalog,
//! projections, and the planning options. `into_problem` validates it and
//! produces the `Problem` the solver runs on.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use serde::Deserialize;

use crate::config::{Depth, SearchConfig, DEFAULT_FT_VALUE};
use crate::movegen::{CandidateFilter, FixedTransfers};
use crate::solver::Problem;
use crate::squad::{
    Chip, ChipPlan, ClubId, Gameweek, Player, PlayerCatalog, PlayerId, Projections, SquadRules,
    ALL_POSITIONS,
};

/// Errors that reject a request before any search runs.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("squad has {0} players, expected {1}")]
    SquadSize(usize, usize),

    #[error("player {0} appears more than once in the squad")]
    DuplicatePlayer(PlayerId),

    #[error("squad player {0} is not in the player list")]
    UnknownPlayer(PlayerId),

    #[error("squad has {count} {position} players, expected {expected}")]
    SquadShape {
        position: &'static str,
        count: usize,
        expected: usize,
    },

    #[error("squad has {count} players from club {club}, the limit is {limit}")]
    ClubLimit {
        club: ClubId,
        count: usize,
        limit: usize,
    },

    #[error("bank must be a non-negative number, got {0}")]
    InvalidBank(f64),

    #[error("bank {bank} plus {market} of player prices does not fit the money range")]
    MoneyOutOfRange { bank: f64, market: f64 },

    #[error("ftValue must be a non-negative number, got {0}")]
    InvalidFtValue(f64),

    #[error("horizon is empty")]
    EmptyHorizon,

    #[error("unknown chip '{0}'")]
    UnknownChip(String),

    #[error("gameweek {gw} already has {existing} planned, cannot add {chip}")]
    ChipConflict {
        gw: Gameweek,
        existing: Chip,
        chip: Chip,
    },

    #[error("fixed transfer in gameweek {gw} names unknown player {id}")]
    UnknownFixedPlayer { gw: Gameweek, id: PlayerId },
}

/// A swap the caller has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedTransferInput {
    pub gameweek: Gameweek,
    pub out_id: PlayerId,
    pub in_id: PlayerId,
}

fn default_free_transfers() -> i64 {
    1
}

fn default_ft_value() -> f64 {
    DEFAULT_FT_VALUE
}

/// The request document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub squad: Vec<PlayerId>,
    pub players: Vec<Player>,
    #[serde(default)]
    pub projections: Projections,
    pub horizon: Vec<Gameweek>,
    /// Money in the bank, in currency units.
    #[serde(default)]
    pub bank: f64,
    #[serde(default = "default_free_transfers")]
    pub free_transfers: i64,
    #[serde(default)]
    pub fixed_transfers: Vec<FixedTransferInput>,
    /// Chip name to the gameweek it is played in.
    #[serde(default)]
    pub chip_plan: BTreeMap<String, Gameweek>,
    #[serde(default = "default_ft_value")]
    pub ft_value: f64,
    #[serde(default)]
    pub depth: Depth,
    #[serde(default)]
    pub filter: CandidateFilter,
}

impl SolveRequest {
    pub fn from_json(text: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, RequestError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json(&text)
    }

    /// Validates the request and builds the problem to solve.
    pub fn into_problem(self) -> Result<Problem, RequestError> {
        let rules = SquadRules::default();
        let catalog = PlayerCatalog::new(self.players);

        validate_squad(&self.squad, &catalog, &rules)?;

        if !self.bank.is_finite() || self.bank < 0.0 {
            return Err(RequestError::InvalidBank(self.bank));
        }
        let bank = (self.bank * 10.0).round();
        let market: u64 = catalog.iter_sorted().map(|p| u64::from(p.cost)).sum();
        // Every bank reachable by selling, and every budget, stays below this.
        if bank + market as f64 > f64::from(i32::MAX) {
            return Err(RequestError::MoneyOutOfRange {
                bank: self.bank,
                market: market as f64 / 10.0,
            });
        }
        if !self.ft_value.is_finite() || self.ft_value < 0.0 {
            return Err(RequestError::InvalidFtValue(self.ft_value));
        }

        let mut seen = HashSet::new();
        let horizon: Vec<Gameweek> = self
            .horizon
            .into_iter()
            .filter(|gw| seen.insert(*gw))
            .collect();
        if horizon.is_empty() {
            return Err(RequestError::EmptyHorizon);
        }

        let mut chips = ChipPlan::new();
        for (name, gw) in &self.chip_plan {
            let chip: Chip = name.parse().map_err(|_| RequestError::UnknownChip(name.clone()))?;
            chips
                .schedule(chip, *gw)
                .map_err(|existing| RequestError::ChipConflict {
                    gw: *gw,
                    existing,
                    chip,
                })?;
        }

        let mut fixed = FixedTransfers::default();
        for t in &self.fixed_transfers {
            for id in [t.out_id, t.in_id] {
                if !catalog.contains(id) {
                    return Err(RequestError::UnknownFixedPlayer { gw: t.gameweek, id });
                }
            }
            fixed.add(t.gameweek, t.out_id, t.in_id);
        }

        let cap = rules.max_free_transfers as i64;
        let free_transfers = self.free_transfers.clamp(0, cap) as u8;
        let config = SearchConfig::for_depth(self.depth).with_ft_value(self.ft_value);

        Ok(Problem {
            catalog,
            projections: self.projections,
            rules,
            squad: self.squad,
            bank: bank as i32,
            free_transfers,
            horizon,
            fixed,
            chips,
            filter: self.filter,
            config,
        })
    }
}

fn validate_squad(
    squad: &[PlayerId],
    catalog: &PlayerCatalog,
    rules: &SquadRules,
) -> Result<(), RequestError> {
    if squad.len() != rules.squad_size() {
        return Err(RequestError::SquadSize(squad.len(), rules.squad_size()));
    }
    let mut seen = HashSet::new();
    for &id in squad {
        if !seen.insert(id) {
            return Err(RequestError::DuplicatePlayer(id));
        }
        if !catalog.contains(id) {
            return Err(RequestError::UnknownPlayer(id));
        }
    }

    let counts = catalog.position_counts(squad);
    for position in ALL_POSITIONS {
        let expected = rules.quota(position);
        let count = counts[position.index()];
        if count != expected {
            return Err(RequestError::SquadShape {
                position: position.abbr(),
                count,
                expected,
            });
        }
    }

    let mut clubs: Vec<(ClubId, usize)> = catalog.club_counts(squad).into_iter().collect();
    clubs.sort_unstable();
    if let Some(&(club, count)) = clubs.iter().find(|(_, n)| *n > rules.max_per_club) {
        return Err(RequestError::ClubLimit {
            club,
            count,
            limit: rules.max_per_club,
        });
    }
    Ok(())
}
