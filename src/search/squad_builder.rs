//! Whole-squad optimizer for wildcard and free-hit weeks.
//!
//! Fills the fifteen slots in position order (GK, GK, DEF x5, MID x5,
//! FWD x3) with a beam over partial squads. Each position draws from a
//! capped pool ranked by the objective: total projection over the target
//! gameweeks. A partial squad is dropped as soon as its spend plus the
//! cheapest possible completion exceeds the budget.

use std::collections::HashMap;

use log::debug;

use crate::config::SearchConfig;
use crate::eval::EvalContext;
use crate::movegen::CandidateFilter;
use crate::squad::{ClubId, Gameweek, PlayerId, Position, ALL_POSITIONS, POSITION_COUNT};

/// A complete squad produced by the optimizer.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltSquad {
    /// Sorted player ids.
    pub squad: Vec<PlayerId>,
    /// Budget left over, in tenths.
    pub bank: i32,
    /// Summed objective of the fifteen players.
    pub score: f64,
}

/// A pool entry with everything the expansion needs.
#[derive(Debug, Clone, Copy)]
struct Entry {
    id: PlayerId,
    club: ClubId,
    cost: u32,
    value: f64,
}

#[derive(Debug, Clone, Default)]
struct Partial {
    picks: Vec<PlayerId>,
    clubs: Vec<ClubId>,
    cost: u32,
    score: f64,
    /// Pool index of the last pick, used to keep picks within a position
    /// in increasing pool order.
    last: usize,
}

/// Ranked pool for one position. Newcomers must pass `filter`; available
/// members of `current` are always present even when they fall outside
/// the size cap.
fn position_pool(
    eval: &EvalContext,
    position: Position,
    current: &[PlayerId],
    filter: &CandidateFilter,
    objective: &[Gameweek],
    size: usize,
) -> Vec<Entry> {
    let entry = |id: PlayerId, club: ClubId, cost: u32| Entry {
        id,
        club,
        cost,
        value: eval.projections.total(id, objective),
    };
    let rank = |pool: &mut Vec<Entry>| {
        pool.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.id.cmp(&b.id)));
    };

    let mut pool: Vec<Entry> = eval
        .catalog
        .iter_sorted()
        .filter(|p| p.available && p.position == position)
        .filter(|p| current.contains(&p.id) || filter.allows(p))
        .map(|p| entry(p.id, p.club, p.cost))
        .collect();
    rank(&mut pool);
    pool.truncate(size);

    for &id in current {
        let Some(p) = eval.catalog.get(id) else {
            continue;
        };
        if p.available && p.position == position && !pool.iter().any(|e| e.id == id) {
            pool.push(entry(p.id, p.club, p.cost));
        }
    }
    rank(&mut pool);
    pool
}

/// `tails[k][m]`: least total cost of `m` entries taken from `pool[k..]`,
/// saturating at `u32::MAX` when fewer than `m` remain.
fn cheapest_tails(pool: &[Entry], quota: usize) -> Vec<Vec<u32>> {
    (0..=pool.len())
        .map(|k| {
            let mut costs: Vec<u32> = pool[k..].iter().map(|e| e.cost).collect();
            costs.sort_unstable();
            let mut sums = vec![0u32; quota + 1];
            for m in 1..=quota {
                let cost = costs.get(m - 1).copied().unwrap_or(u32::MAX);
                sums[m] = sums[m - 1].saturating_add(cost);
            }
            sums
        })
        .collect()
}

/// Sorts best first: score descending, then cheaper, then ids.
fn rank_partials(beam: &mut [Partial]) {
    beam.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.cost.cmp(&b.cost))
            .then_with(|| sorted(&a.picks).cmp(&sorted(&b.picks)))
    });
}

fn sorted(ids: &[PlayerId]) -> Vec<PlayerId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids
}

/// Keeps the highest-scoring partial per player set, first seen on ties.
fn dedup(beam: Vec<Partial>) -> Vec<Partial> {
    let mut index: HashMap<Vec<PlayerId>, usize> = HashMap::with_capacity(beam.len());
    let mut kept: Vec<Partial> = Vec::with_capacity(beam.len());
    for partial in beam {
        let key = sorted(&partial.picks);
        match index.get(&key) {
            Some(&i) => {
                if partial.score > kept[i].score {
                    kept[i] = partial;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(partial);
            }
        }
    }
    kept
}

/// Best legal squads within `budget` tenths, maximizing projection over
/// `objective`. Players outside `current` are only bought when `filter`
/// allows them. Empty when no legal squad fits.
pub fn build_squads(
    eval: &EvalContext,
    current: &[PlayerId],
    filter: &CandidateFilter,
    budget: u32,
    objective: &[Gameweek],
    config: &SearchConfig,
) -> Vec<BuiltSquad> {
    let rules = eval.rules;
    let slots = rules.slot_order();

    let mut pools: [Vec<Entry>; POSITION_COUNT] = Default::default();
    for (i, pool) in pools.iter_mut().enumerate() {
        let position = ALL_POSITIONS[i];
        *pool = position_pool(eval, position, current, filter, objective, config.chip_pool_size);
        if pool.len() < rules.quota(position) {
            debug!(
                "squad builder: {} pool has {} players, {} needed",
                position.abbr(),
                pool.len(),
                rules.quota(position)
            );
            return Vec::new();
        }
    }

    let tails: Vec<Vec<Vec<u32>>> = ALL_POSITIONS
        .iter()
        .map(|&p| cheapest_tails(&pools[p.index()], rules.quota(p)))
        .collect();
    // after[i]: cheapest spend on every position after position i.
    let mut after = [0u32; POSITION_COUNT];
    for i in (0..POSITION_COUNT - 1).rev() {
        let next = ALL_POSITIONS[i + 1];
        after[i] = after[i + 1].saturating_add(tails[i + 1][0][rules.quota(next)]);
    }
    let first = ALL_POSITIONS[0];
    if tails[0][0][rules.quota(first)].saturating_add(after[0]) > budget {
        return Vec::new();
    }

    let mut beam = vec![Partial::default()];
    for (slot, &position) in slots.iter().enumerate() {
        let pool = &pools[position.index()];
        let opens_position = slot == 0 || slots[slot - 1] != position;
        // Slots of this position still to fill after this one.
        let left_after = slots[slot + 1..]
            .iter()
            .take_while(|&&p| p == position)
            .count();

        let mut next = Vec::new();
        for partial in &beam {
            let start = if opens_position { 0 } else { partial.last + 1 };
            for k in start..pool.len() {
                let entry = pool[k];
                let club_count = partial.clubs.iter().filter(|&&c| c == entry.club).count();
                if club_count >= rules.max_per_club {
                    continue;
                }
                let cost = partial.cost + entry.cost;
                let completion = tails[position.index()][k + 1][left_after]
                    .saturating_add(after[position.index()]);
                if cost.saturating_add(completion) > budget {
                    continue;
                }
                let mut child = partial.clone();
                child.picks.push(entry.id);
                child.clubs.push(entry.club);
                child.cost = cost;
                child.score += entry.value;
                child.last = k;
                next.push(child);
            }
        }

        beam = dedup(next);
        rank_partials(&mut beam);
        beam.truncate(config.chip_beam_width);
        if beam.is_empty() {
            break;
        }
    }

    let built: Vec<BuiltSquad> = beam
        .into_iter()
        .filter(|p| p.picks.len() == slots.len())
        .take(config.chip_squads)
        .map(|p| BuiltSquad {
            squad: sorted(&p.picks),
            bank: budget as i32 - p.cost as i32,
            score: p.score,
        })
        .collect();
    debug!(
        "squad builder: {} squads, best {:.2}",
        built.len(),
        built.first().map_or(0.0, |b| b.score)
    );
    built
}
