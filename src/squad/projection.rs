//! Per-player, per-gameweek point projections.
//!
//! Supplied whole by the prediction engine and immutable during a solve.
//! Missing values read as zero rather than failing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::player::{Gameweek, PlayerId};

/// Projected points keyed by player then gameweek.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projections {
    points: HashMap<PlayerId, HashMap<Gameweek, f64>>,
}

impl Projections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one projection, replacing any previous value.
    pub fn insert(&mut self, id: PlayerId, gw: Gameweek, points: f64) {
        self.points.entry(id).or_default().insert(gw, points);
    }

    /// Projected points for a player in a gameweek (0 when unknown).
    pub fn get(&self, id: PlayerId, gw: Gameweek) -> f64 {
        self.points
            .get(&id)
            .and_then(|by_gw| by_gw.get(&gw))
            .copied()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }

    /// Sum of a player's projections over the given gameweeks.
    pub fn total(&self, id: PlayerId, gameweeks: &[Gameweek]) -> f64 {
        gameweeks.iter().map(|&gw| self.get(id, gw)).sum()
    }
}
