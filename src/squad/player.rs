//! Players and the player catalog.
//!
//! The catalog is the read-only universe the planner searches over: every
//! player's position, club, price and availability. Prices are stored in
//! tenths of a currency unit so budget arithmetic stays exact.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Unique player identifier.
pub type PlayerId = u32;

/// Club identifier.
pub type ClubId = u16;

/// Gameweek number.
pub type Gameweek = u16;

/// Number of playing positions.
pub const POSITION_COUNT: usize = 4;

/// A playing position, numbered 1-4 like the upstream element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    Goalkeeper = 1,
    Defender = 2,
    Midfielder = 3,
    Forward = 4,
}

/// All positions in squad order.
pub const ALL_POSITIONS: [Position; POSITION_COUNT] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Midfielder,
    Position::Forward,
];

impl Position {
    /// Zero-based index for per-position arrays.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the three-letter label.
    pub const fn abbr(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Parses a position from its element type number (1-4).
    pub fn from_element_type(n: u8) -> Option<Position> {
        match n {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Position {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Position::from_element_type(n).ok_or_else(|| format!("invalid position {}", n))
    }
}

impl From<Position> for u8 {
    fn from(p: Position) -> u8 {
        p as u8
    }
}

fn default_available() -> bool {
    true
}

/// A player in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub name: String,
    pub position: Position,
    pub club: ClubId,
    /// Price in tenths of a currency unit.
    pub cost: u32,
    /// False when the player is ruled out for the whole horizon.
    #[serde(default = "default_available")]
    pub available: bool,
}

impl Player {
    /// Price in currency units.
    pub fn price(&self) -> f64 {
        self.cost as f64 / 10.0
    }
}

/// Read-only lookup of every known player.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: HashMap<PlayerId, Player>,
}

impl PlayerCatalog {
    /// Builds a catalog. Later duplicates replace earlier ones.
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        PlayerCatalog {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Iterates players in ascending id order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Player> {
        let mut ids: Vec<PlayerId> = self.players.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.players.get(&id))
    }

    /// Position of a player, if known.
    pub fn position(&self, id: PlayerId) -> Option<Position> {
        self.players.get(&id).map(|p| p.position)
    }

    /// Club of a player, if known.
    pub fn club(&self, id: PlayerId) -> Option<ClubId> {
        self.players.get(&id).map(|p| p.club)
    }

    /// Cost of a player in tenths; unknown players cost nothing.
    pub fn cost(&self, id: PlayerId) -> u32 {
        self.players.get(&id).map_or(0, |p| p.cost)
    }

    /// Total cost of a set of players in tenths.
    pub fn squad_value(&self, ids: &[PlayerId]) -> u32 {
        ids.iter().map(|&id| self.cost(id)).sum()
    }

    /// Counts squad members per club.
    pub fn club_counts(&self, ids: &[PlayerId]) -> HashMap<ClubId, usize> {
        let mut counts = HashMap::new();
        for &id in ids {
            if let Some(club) = self.club(id) {
                *counts.entry(club).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Counts squad members per position.
    pub fn position_counts(&self, ids: &[PlayerId]) -> [usize; POSITION_COUNT] {
        let mut counts = [0; POSITION_COUNT];
        for &id in ids {
            if let Some(pos) = self.position(id) {
                counts[pos.index()] += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: PlayerId, position: Position, club: ClubId, cost: u32) -> Player {
        Player {
            id,
            name: format!("P{}", id),
            position,
            club,
            cost,
            available: true,
        }
    }

    #[test]
    fn position_element_type_roundtrip() {
        for p in ALL_POSITIONS {
            assert_eq!(Position::from_element_type(p as u8), Some(p));
        }
        assert_eq!(Position::from_element_type(0), None);
        assert_eq!(Position::from_element_type(5), None);
    }

    #[test]
    fn position_labels() {
        assert_eq!(Position::Goalkeeper.abbr(), "GKP");
        assert_eq!(Position::Forward.abbr(), "FWD");
        assert_eq!(Position::Midfielder.index(), 2);
    }

    #[test]
    fn player_price_in_currency_units() {
        assert_eq!(player(1, Position::Forward, 1, 115).price(), 11.5);
    }

    #[test]
    fn player_deserializes_with_defaults() {
        let p: Player =
            serde_json::from_str(r#"{"id":7,"position":3,"club":4,"cost":55}"#).unwrap();
        assert_eq!(p.position, Position::Midfielder);
        assert!(p.available);
        assert!(p.name.is_empty());
    }

    #[test]
    fn player_rejects_bad_position() {
        let res: Result<Player, _> =
            serde_json::from_str(r#"{"id":7,"position":9,"club":4,"cost":55}"#);
        assert!(res.is_err());
    }

    #[test]
    fn catalog_counts() {
        let catalog = PlayerCatalog::new(vec![
            player(1, Position::Goalkeeper, 1, 45),
            player(2, Position::Defender, 1, 50),
            player(3, Position::Defender, 2, 60),
        ]);
        let ids = [1, 2, 3, 99];
        assert_eq!(catalog.squad_value(&ids), 155);
        assert_eq!(catalog.club_counts(&ids).get(&1), Some(&2));
        assert_eq!(catalog.position_counts(&ids), [1, 2, 0, 0]);
        let sorted: Vec<PlayerId> = catalog.iter_sorted().map(|p| p.id).collect();
        assert_eq!(sorted, vec![1, 2, 3]);
    }
}
