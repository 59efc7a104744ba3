//! Squad evaluation.
//!
//! Scores a squad for one gameweek: best legal lineup, captaincy, and
//! chip effects.

pub mod formation;
pub mod squad;

pub use formation::{select_formation, Formation, Pick};
pub use squad::{score_formation, EvalContext, Lineup};
