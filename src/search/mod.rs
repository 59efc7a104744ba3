//! Search and planning.
//!
//! A beam search over gameweeks picks transfer plans; a whole-squad
//! optimizer serves wildcard and free-hit weeks; a diversity filter picks
//! distinct plans from the final beam.

pub mod beam;
pub mod diversity;
pub mod squad_builder;

pub use beam::{dedup, expand, prune, run_beam, run_hold};
pub use diversity::select_diverse;
pub use squad_builder::{build_squads, BuiltSquad};
