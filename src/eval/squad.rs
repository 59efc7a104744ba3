//! Squad evaluation for a single gameweek.
//!
//! Scores a 15-player squad by selecting its best lineup and applying
//! captaincy and chip effects.

use crate::squad::{Chip, Gameweek, PlayerCatalog, PlayerId, Projections, SquadRules};

use super::formation::{select_formation, Formation, Pick};

/// Read-only inputs shared by every evaluation in a solve.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    pub catalog: &'a PlayerCatalog,
    pub projections: &'a Projections,
    pub rules: &'a SquadRules,
}

/// A squad's lineup for display, with projected points.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    pub starters: Vec<PlayerId>,
    pub bench: Vec<PlayerId>,
    pub captain: Option<PlayerId>,
    pub vice_captain: Option<PlayerId>,
    /// Projected points including captaincy and chip effects.
    pub points: f64,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        catalog: &'a PlayerCatalog,
        projections: &'a Projections,
        rules: &'a SquadRules,
    ) -> Self {
        EvalContext {
            catalog,
            projections,
            rules,
        }
    }

    /// Picks for the squad members the catalog knows about.
    fn picks(&self, squad: &[PlayerId], gw: Gameweek) -> Vec<Pick> {
        squad
            .iter()
            .filter_map(|&id| {
                self.catalog.position(id).map(|position| Pick {
                    id,
                    position,
                    points: self.projections.get(id, gw),
                })
            })
            .collect()
    }

    /// Selects the lineup for a gameweek.
    pub fn formation(&self, squad: &[PlayerId], gw: Gameweek) -> Formation {
        select_formation(&self.picks(squad, gw), self.rules)
    }

    /// Projected points for a squad in one gameweek.
    pub fn evaluate(&self, squad: &[PlayerId], gw: Gameweek, chip: Option<Chip>) -> f64 {
        score_formation(&self.formation(squad, gw), chip)
    }

    /// Lineup with captain and bench for squad display.
    pub fn lineup(&self, squad: &[PlayerId], gw: Gameweek, chip: Option<Chip>) -> Lineup {
        let formation = self.formation(squad, gw);
        let points = score_formation(&formation, chip);
        Lineup {
            starters: formation.starters.iter().map(|p| p.id).collect(),
            bench: formation.bench.iter().map(|p| p.id).collect(),
            captain: formation.captain.map(|p| p.id),
            vice_captain: formation.vice_captain.map(|p| p.id),
            points,
        }
    }
}

/// Applies captaincy and chip effects to a selected formation.
pub fn score_formation(formation: &Formation, chip: Option<Chip>) -> f64 {
    let multiplier = match chip {
        Some(Chip::TripleCaptain) => 3.0,
        _ => 2.0,
    };
    let mut score = formation.starter_points();
    if let Some(captain) = formation.captain {
        score += (multiplier - 1.0) * captain.points;
    }
    if chip == Some(Chip::BenchBoost) {
        score += formation.bench_points();
    }
    score
}
