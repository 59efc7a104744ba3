//! Search configuration.
//!
//! `Depth` presets bound the total work of a solve: beam width, candidates
//! per position, transfers per gameweek, and the chip optimizer's own beam.
//! Everything the search needs is carried in one `SearchConfig` value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default value of a banked free transfer, in points.
pub const DEFAULT_FT_VALUE: f64 = 1.5;

/// Search depth preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Quick,
    #[default]
    Standard,
    Deep,
}

impl FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Depth::Quick),
            "standard" => Ok(Depth::Standard),
            "deep" => Ok(Depth::Deep),
            other => Err(format!("unknown depth '{}'", other)),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Depth::Quick => "quick",
            Depth::Standard => "standard",
            Depth::Deep => "deep",
        };
        f.write_str(name)
    }
}

/// Tunables for one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub depth: Depth,
    /// States kept after each gameweek.
    pub beam_width: usize,
    /// Base candidate pool size per position.
    pub candidates_per_position: usize,
    /// Transfers considered per gameweek outside chip weeks.
    pub max_transfers: usize,
    /// Squad members considered for a single sale.
    pub sell_candidates: usize,
    /// Squad members paired up in the two-transfer branch.
    pub multi_sell_candidates: usize,
    /// Incoming candidates per seller in the two-transfer branch.
    pub multi_buy_candidates: usize,
    /// Single-gameweek spikes added per position per gameweek.
    pub spike_per_position: usize,
    /// Beam width of the chip squad optimizer.
    pub chip_beam_width: usize,
    /// Pool size per position for the chip squad optimizer.
    pub chip_pool_size: usize,
    /// Squads returned by the chip squad optimizer.
    pub chip_squads: usize,
    /// Value of a banked free transfer; affects ranking only.
    pub ft_value: f64,
    /// Paths returned.
    pub paths: usize,
    /// Minimum move-set symmetric difference between returned paths.
    pub min_path_difference: usize,
    /// Expand beam states on the rayon pool.
    pub parallel: bool,
}

impl SearchConfig {
    /// Builds the preset for a depth with default tunables.
    pub fn for_depth(depth: Depth) -> Self {
        let (beam_width, candidates_per_position, max_transfers) = match depth {
            Depth::Quick => (15, 8, 1),
            Depth::Standard => (30, 12, 2),
            Depth::Deep => (60, 20, 2),
        };
        let (chip_beam_width, chip_pool_size, chip_squads) = match depth {
            Depth::Quick => (50, 15, 2),
            Depth::Standard => (100, 20, 3),
            Depth::Deep => (200, 30, 5),
        };
        SearchConfig {
            depth,
            beam_width,
            candidates_per_position,
            max_transfers,
            sell_candidates: 15,
            multi_sell_candidates: 5,
            multi_buy_candidates: 5,
            spike_per_position: 3,
            chip_beam_width,
            chip_pool_size,
            chip_squads,
            ft_value: DEFAULT_FT_VALUE,
            paths: 3,
            min_path_difference: 2,
            parallel: true,
        }
    }

    /// Sets the free-transfer value.
    pub fn with_ft_value(mut self, ft_value: f64) -> Self {
        self.ft_value = ft_value;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::for_depth(Depth::default())
    }
}
