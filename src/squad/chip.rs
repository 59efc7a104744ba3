//! Chips and the chip plan.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::Gameweek;

/// A one-off chip played for a single gameweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chip {
    /// Unlimited transfers; the new squad is kept.
    Wildcard,
    /// Unlimited transfers for one gameweek; the old squad returns afterwards.
    FreeHit,
    /// Bench players score too.
    BenchBoost,
    /// Captain scores triple instead of double.
    TripleCaptain,
}

impl Chip {
    /// True for chips that rebuild the whole squad.
    pub const fn rebuilds_squad(self) -> bool {
        matches!(self, Chip::Wildcard | Chip::FreeHit)
    }

    /// Returns the canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Chip::Wildcard => "wildcard",
            Chip::FreeHit => "free_hit",
            Chip::BenchBoost => "bench_boost",
            Chip::TripleCaptain => "triple_captain",
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chip {
    type Err = String;

    /// Accepts canonical names and the upstream short names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wildcard" | "wc" => Ok(Chip::Wildcard),
            "free_hit" | "freehit" | "fh" => Ok(Chip::FreeHit),
            "bench_boost" | "benchboost" | "bboost" | "bb" => Ok(Chip::BenchBoost),
            "triple_captain" | "triplecaptain" | "3xc" | "tc" => Ok(Chip::TripleCaptain),
            other => Err(other.to_string()),
        }
    }
}

/// Which chip, if any, is played in each gameweek.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipPlan {
    by_gameweek: BTreeMap<Gameweek, Chip>,
}

impl ChipPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a chip. Returns the chip already planned for that
    /// gameweek, leaving the plan untouched, if there is one.
    pub fn schedule(&mut self, chip: Chip, gw: Gameweek) -> Result<(), Chip> {
        match self.by_gameweek.get(&gw) {
            Some(&existing) => Err(existing),
            None => {
                self.by_gameweek.insert(gw, chip);
                Ok(())
            }
        }
    }

    pub fn chip_for(&self, gw: Gameweek) -> Option<Chip> {
        self.by_gameweek.get(&gw).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Gameweek, Chip)> + '_ {
        self.by_gameweek.iter().map(|(&gw, &c)| (gw, c))
    }
}
