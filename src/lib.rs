//! Transfer planner library.
//!
//! Plans fantasy football transfers over several gameweeks with a beam
//! search. Exposes the squad model, evaluation, move generation, search,
//! and JSON protocol modules for the binary, integration tests and
//! benchmarks.

pub mod config;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod solver;
pub mod squad;

pub use config::{Depth, SearchConfig};
pub use protocol::{RequestError, SolveRequest, TransferPath};
pub use solver::{solve, solve_request, Problem};
