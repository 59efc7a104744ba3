//! Solve results as they are written out.
//!
//! Internal plans keep money in integer tenths and unrounded scores; the
//! response converts prices to currency units and rounds every score and
//! price to two decimals.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::squad::{BeamState, Chip, ClubId, Gameweek, GameweekPlan, PlayerCatalog, PlayerId, Transfer};

/// Rounds to two decimals.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn tenths_to_price(tenths: i64) -> f64 {
    round2(tenths as f64 / 10.0)
}

/// One move in a gameweek row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRow {
    pub out_id: PlayerId,
    pub out_name: String,
    pub out_team: ClubId,
    pub out_price: f64,
    pub in_id: PlayerId,
    pub in_name: String,
    pub in_team: ClubId,
    pub in_price: f64,
    pub gain: f64,
    pub is_free: bool,
}

/// One gameweek of a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameweekRow {
    /// `bank` or `transfer`.
    pub action: &'static str,
    pub ft_available: u8,
    pub ft_after: u8,
    pub moves: Vec<MoveRow>,
    pub hit_cost: u32,
    pub gw_score: f64,
    pub squad_ids: Vec<PlayerId>,
    pub bank: f64,
    pub chip_played: Option<Chip>,
}

/// A complete multi-gameweek plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferPath {
    pub id: usize,
    /// Projected points minus hits over the horizon.
    pub total_score: f64,
    /// `total_score` less the hold baseline.
    pub score_vs_hold: f64,
    pub total_hits: u32,
    pub transfers_by_gw: BTreeMap<Gameweek, GameweekRow>,
}

impl MoveRow {
    fn new(catalog: &PlayerCatalog, t: &Transfer) -> Self {
        let name = |id| catalog.get(id).map(|p| p.name.clone()).unwrap_or_default();
        let team = |id| catalog.club(id).unwrap_or_default();
        let price = |id| tenths_to_price(catalog.cost(id) as i64);
        MoveRow {
            out_id: t.out_id,
            out_name: name(t.out_id),
            out_team: team(t.out_id),
            out_price: price(t.out_id),
            in_id: t.in_id,
            in_name: name(t.in_id),
            in_team: team(t.in_id),
            in_price: price(t.in_id),
            gain: round2(t.gain),
            is_free: t.is_free,
        }
    }
}

impl GameweekRow {
    fn new(catalog: &PlayerCatalog, plan: &GameweekPlan) -> Self {
        GameweekRow {
            action: plan.action.name(),
            ft_available: plan.ft_available,
            ft_after: plan.ft_after,
            moves: plan.transfers.iter().map(|t| MoveRow::new(catalog, t)).collect(),
            hit_cost: plan.hit_cost,
            gw_score: round2(plan.gw_score),
            squad_ids: plan.squad.clone(),
            bank: tenths_to_price(plan.bank as i64),
            chip_played: plan.chip,
        }
    }
}

impl TransferPath {
    /// Builds path `id` from a final beam state.
    pub fn from_state(id: usize, state: &BeamState, hold_score: f64, catalog: &PlayerCatalog) -> Self {
        TransferPath {
            id,
            total_score: round2(state.display_score),
            score_vs_hold: round2(state.display_score - hold_score),
            total_hits: state.hits,
            transfers_by_gw: state
                .plan
                .iter()
                .map(|(&gw, plan)| (gw, GameweekRow::new(catalog, plan)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squad::{Action, Player, Position};

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(tenths_to_price(55), 5.5);
        assert_eq!(tenths_to_price(-3), -0.3);
    }

    #[test]
    fn path_serializes_with_names_and_prices() {
        let catalog = PlayerCatalog::new([
            Player {
                id: 1,
                name: "Keeper".into(),
                position: Position::Goalkeeper,
                club: 4,
                cost: 45,
                available: true,
            },
            Player {
                id: 2,
                name: "Backup".into(),
                position: Position::Goalkeeper,
                club: 9,
                cost: 40,
                available: true,
            },
        ]);
        let mut state = BeamState::initial(vec![2], 5, 1);
        state.display_score = 61.236;
        state.hits = 1;
        state.plan.insert(
            3,
            GameweekPlan {
                action: Action::Transfer,
                ft_available: 1,
                ft_after: 1,
                transfers: vec![Transfer {
                    out_id: 1,
                    in_id: 2,
                    gain: 0.333,
                    is_free: true,
                }],
                hit_cost: 4,
                gw_score: 65.236,
                squad: vec![2],
                bank: 5,
                chip: Some(Chip::TripleCaptain),
            },
        );
        let path = TransferPath::from_state(1, &state, 60.0, &catalog);
        assert_eq!(path.total_score, 61.24);
        assert_eq!(path.score_vs_hold, 1.24);

        let v = serde_json::to_value(&path).unwrap();
        let row = &v["transfers_by_gw"]["3"];
        assert_eq!(row["action"], "transfer");
        assert_eq!(row["bank"], 0.5);
        assert_eq!(row["chip_played"], "triple_captain");
        assert_eq!(row["squad_ids"], serde_json::json!([2]));
        let m = &row["moves"][0];
        assert_eq!(m["out_name"], "Keeper");
        assert_eq!(m["out_team"], 4);
        assert_eq!(m["out_price"], 4.5);
        assert_eq!(m["in_price"], 4.0);
        assert_eq!(m["gain"], 0.33);
        assert_eq!(v["total_hits"], 1);
    }

    #[test]
    fn no_chip_serializes_as_null() {
        let catalog = PlayerCatalog::default();
        let mut state = BeamState::initial(vec![], 0, 1);
        state.plan.insert(
            1,
            GameweekPlan {
                action: Action::Bank,
                ft_available: 1,
                ft_after: 2,
                transfers: Vec::new(),
                hit_cost: 0,
                gw_score: 10.0,
                squad: Vec::new(),
                bank: 0,
                chip: None,
            },
        );
        let v = serde_json::to_value(TransferPath::from_state(1, &state, 0.0, &catalog)).unwrap();
        assert!(v["transfers_by_gw"]["1"]["chip_played"].is_null());
        assert_eq!(v["transfers_by_gw"]["1"]["action"], "bank");
    }
}
