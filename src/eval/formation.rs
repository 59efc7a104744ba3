//! Starting lineup selection.
//!
//! Picks the legal starting lineup that maximizes summed projection: the
//! per-position minimums first, then the best remaining players into the
//! flexible slots up to each position's maximum. Pure and free of catalog
//! lookups so both the evaluator and squad display code can share it.

use crate::squad::{PlayerId, Position, SquadRules, ALL_POSITIONS, POSITION_COUNT};

/// A squad member with its projection for the target gameweek.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub id: PlayerId,
    pub position: Position,
    pub points: f64,
}

/// A selected lineup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formation {
    /// Starters grouped by position, best first within a position.
    pub starters: Vec<Pick>,
    /// Reserve goalkeeper first, then outfield players best first.
    pub bench: Vec<Pick>,
    pub captain: Option<Pick>,
    pub vice_captain: Option<Pick>,
}

impl Formation {
    /// Summed projection of the starters, without captaincy.
    pub fn starter_points(&self) -> f64 {
        self.starters.iter().map(|p| p.points).sum()
    }

    /// Summed projection of the bench.
    pub fn bench_points(&self) -> f64 {
        self.bench.iter().map(|p| p.points).sum()
    }

    /// Starters per position.
    pub fn shape(&self) -> [usize; POSITION_COUNT] {
        let mut counts = [0; POSITION_COUNT];
        for p in &self.starters {
            counts[p.position.index()] += 1;
        }
        counts
    }
}

/// Sorts descending by points; ties keep encounter order.
fn sort_desc(picks: &mut [Pick]) {
    picks.sort_by(|a, b| b.points.total_cmp(&a.points));
}

/// Selects the best legal starting lineup from a squad.
pub fn select_formation(players: &[Pick], rules: &SquadRules) -> Formation {
    let mut groups: [Vec<Pick>; POSITION_COUNT] = Default::default();
    for p in players {
        groups[p.position.index()].push(*p);
    }
    for g in groups.iter_mut() {
        sort_desc(g);
    }

    let mut counts = [0usize; POSITION_COUNT];
    let mut chosen: Vec<(usize, usize)> = Vec::with_capacity(rules.starting_size);
    let mut flex: Vec<(usize, usize)> = Vec::new();

    for pos in ALL_POSITIONS {
        let i = pos.index();
        let len = groups[i].len();
        let min = rules.min_starters[i].min(len);
        let max = rules.max_starters[i].min(len);
        chosen.extend((0..min).map(|rank| (i, rank)));
        counts[i] = min;
        flex.extend((min..max).map(|rank| (i, rank)));
    }

    flex.sort_by(|a, b| groups[b.0][b.1].points.total_cmp(&groups[a.0][a.1].points));

    let open = rules.starting_size.saturating_sub(chosen.len());
    let mut filled = 0;
    for (i, rank) in flex {
        if filled == open {
            break;
        }
        if counts[i] < rules.max_starters[i] {
            chosen.push((i, rank));
            counts[i] += 1;
            filled += 1;
        }
    }

    chosen.sort_unstable();
    let starters: Vec<Pick> = chosen.iter().map(|&(i, rank)| groups[i][rank]).collect();

    let mut bench_gk: Vec<Pick> = Vec::new();
    let mut bench_outfield: Vec<Pick> = Vec::new();
    for (i, group) in groups.iter().enumerate() {
        for (rank, p) in group.iter().enumerate() {
            if chosen.binary_search(&(i, rank)).is_ok() {
                continue;
            }
            if p.position == Position::Goalkeeper {
                bench_gk.push(*p);
            } else {
                bench_outfield.push(*p);
            }
        }
    }
    sort_desc(&mut bench_outfield);
    bench_gk.extend(bench_outfield);

    let mut by_points = starters.clone();
    sort_desc(&mut by_points);

    Formation {
        captain: by_points.first().copied(),
        vice_captain: by_points.get(1).copied(),
        starters,
        bench: bench_gk,
    }
}
