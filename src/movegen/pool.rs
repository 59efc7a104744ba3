//! Candidate pools for incoming transfers.
//!
//! Each position keeps the best off-squad players by total projection over
//! the horizon, capped in size, plus the starting squad's own players so
//! that a player sold earlier in the plan can be bought back. A per-gameweek spike overlay adds the top
//! few players for each single gameweek so that a one-week fixture swing
//! is not lost behind the horizon-total ranking.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::squad::{
    Gameweek, Player, PlayerCatalog, PlayerId, Position, Projections, POSITION_COUNT,
};

/// Caller restrictions on who may be bought.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilter {
    /// Cheapest allowed price, in currency units.
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Most expensive allowed price, in currency units.
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Players never to buy.
    #[serde(default)]
    pub excluded: HashSet<PlayerId>,
}

impl CandidateFilter {
    pub fn allows(&self, player: &Player) -> bool {
        let price = player.price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        !self.excluded.contains(&player.id)
    }
}

/// Ranked incoming-transfer candidates per position.
#[derive(Debug, Clone, Default)]
pub struct CandidatePools {
    base: [Vec<PlayerId>; POSITION_COUNT],
    spikes: BTreeMap<Gameweek, [Vec<PlayerId>; POSITION_COUNT]>,
}

/// Sorts ids by score descending, ties by id ascending.
fn rank(scored: &mut [(PlayerId, f64)]) {
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
}

impl CandidatePools {
    /// Builds the pools for a solve. Players in `squad` do not count
    /// against the size cap.
    pub fn build(
        catalog: &PlayerCatalog,
        projections: &Projections,
        horizon: &[Gameweek],
        squad: &[PlayerId],
        filter: &CandidateFilter,
        config: &SearchConfig,
    ) -> Self {
        let mut eligible: [Vec<PlayerId>; POSITION_COUNT] = Default::default();
        let mut owned: [Vec<PlayerId>; POSITION_COUNT] = Default::default();
        for p in catalog.iter_sorted() {
            if !p.available || !filter.allows(p) {
                continue;
            }
            if squad.contains(&p.id) {
                owned[p.position.index()].push(p.id);
            } else {
                eligible[p.position.index()].push(p.id);
            }
        }

        let mut pools = CandidatePools::default();
        for (i, ids) in eligible.iter().enumerate() {
            let mut scored: Vec<(PlayerId, f64)> = ids
                .iter()
                .map(|&id| (id, projections.total(id, horizon)))
                .collect();
            rank(&mut scored);
            scored.truncate(config.candidates_per_position);
            scored.extend(owned[i].iter().map(|&id| (id, projections.total(id, horizon))));
            rank(&mut scored);
            pools.base[i] = scored.into_iter().map(|(id, _)| id).collect();
        }

        for &gw in horizon {
            let mut per_position: [Vec<PlayerId>; POSITION_COUNT] = Default::default();
            for (i, ids) in eligible.iter().enumerate() {
                let mut scored: Vec<(PlayerId, f64)> = ids
                    .iter()
                    .filter(|id| !pools.base[i].contains(id))
                    .map(|&id| (id, projections.get(id, gw)))
                    .collect();
                rank(&mut scored);
                scored.truncate(config.spike_per_position);
                per_position[i] = scored.into_iter().map(|(id, _)| id).collect();
            }
            pools.spikes.insert(gw, per_position);
        }

        pools
    }

    /// Horizon-ranked pool for a position.
    pub fn base(&self, position: Position) -> &[PlayerId] {
        &self.base[position.index()]
    }

    /// Spike overlay for a position in one gameweek.
    pub fn spikes(&self, position: Position, gw: Gameweek) -> &[PlayerId] {
        self.spikes
            .get(&gw)
            .map_or(&[][..], |s| s[position.index()].as_slice())
    }

    /// Candidates for a gameweek: the base pool followed by that week's spikes.
    pub fn candidates(&self, position: Position, gw: Gameweek) -> impl Iterator<Item = PlayerId> + '_ {
        self.base(position)
            .iter()
            .chain(self.spikes(position, gw))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Depth;

    fn mid(id: PlayerId, cost: u32) -> Player {
        Player {
            id,
            name: format!("M{}", id),
            position: Position::Midfielder,
            club: id as u16,
            cost,
            available: true,
        }
    }

    fn fixture() -> (PlayerCatalog, Projections) {
        let mut players = Vec::new();
        let mut proj = Projections::new();
        for id in 1..=20 {
            players.push(mid(id, 40 + id));
            // Higher ids project better over the horizon.
            proj.insert(id, 1, id as f64 * 0.1);
            proj.insert(id, 2, id as f64 * 0.1);
        }
        // A low-ranked player with a huge week 2.
        proj.insert(3, 2, 15.0);
        (PlayerCatalog::new(players), proj)
    }

    fn small_config() -> SearchConfig {
        let mut cfg = SearchConfig::for_depth(Depth::Quick);
        cfg.candidates_per_position = 5;
        cfg.spike_per_position = 2;
        cfg
    }

    #[test]
    fn base_pool_ranked_and_capped() {
        let (catalog, proj) = fixture();
        let pools = CandidatePools::build(
            &catalog,
            &proj,
            &[1, 2],
            &[20],
            &CandidateFilter::default(),
            &small_config(),
        );
        // 3 has a big total (0.3 + 15.0); squad member 20 sits outside the cap.
        assert_eq!(pools.base(Position::Midfielder), &[3, 20, 19, 18, 17, 16]);
        assert!(pools.base(Position::Forward).is_empty());
    }

    #[test]
    fn spikes_catch_single_week_outliers() {
        let (catalog, mut proj) = fixture();
        proj.insert(2, 1, 9.0);
        let pools = CandidatePools::build(
            &catalog,
            &proj,
            &[1, 2],
            &[],
            &CandidateFilter::default(),
            &small_config(),
        );
        let base = pools.base(Position::Midfielder);
        assert!(base.contains(&3));
        assert!(base.contains(&2));
        // Spikes never repeat base players.
        for gw in [1, 2] {
            for id in pools.spikes(Position::Midfielder, gw) {
                assert!(!base.contains(id));
            }
            assert_eq!(pools.spikes(Position::Midfielder, gw).len(), 2);
        }
        let all: Vec<PlayerId> = pools.candidates(Position::Midfielder, 1).collect();
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn unavailable_and_filtered_players_excluded() {
        let (base_catalog, proj) = fixture();
        let mut injured = mid(19, 59);
        injured.available = false;
        let catalog = PlayerCatalog::new(base_catalog.iter_sorted().cloned().chain([injured]));
        let filter = CandidateFilter {
            min_price: None,
            max_price: Some(5.9),
            excluded: [18].into_iter().collect(),
        };
        let pools = CandidatePools::build(&catalog, &proj, &[1, 2], &[], &filter, &small_config());
        let base = pools.base(Position::Midfielder);
        assert!(!base.contains(&19));
        assert!(!base.contains(&18));
        assert!(!base.contains(&20), "6.0 is above the max price");
        assert_eq!(base[0], 3);
    }

    #[test]
    fn filter_price_bounds() {
        let filter = CandidateFilter {
            min_price: Some(4.5),
            max_price: Some(5.0),
            excluded: HashSet::new(),
        };
        assert!(!filter.allows(&mid(1, 44)));
        assert!(filter.allows(&mid(1, 45)));
        assert!(filter.allows(&mid(1, 50)));
        assert!(!filter.allows(&mid(1, 51)));
    }

    #[test]
    fn squad_players_can_be_bought_back() {
        let (catalog, proj) = fixture();
        let filter = CandidateFilter {
            excluded: [1].into_iter().collect(),
            ..CandidateFilter::default()
        };
        let pools =
            CandidatePools::build(&catalog, &proj, &[1, 2], &[1, 2], &filter, &small_config());
        let base = pools.base(Position::Midfielder);
        assert!(base.contains(&2));
        assert!(!base.contains(&1));
        assert_eq!(base.len(), 6);
    }
}
