//! Solve entry points.
//!
//! A `Problem` is a validated request: the catalog, projections, squad,
//! bank, free transfers, horizon, fixed transfers, chip plan, candidate
//! filter and search configuration. `solve` runs the hold replay and the
//! beam search over it and returns the chosen transfer paths.

use std::time::Instant;

use log::{debug, info};

use crate::config::SearchConfig;
use crate::eval::EvalContext;
use crate::movegen::{CandidateFilter, CandidatePools, FixedTransfers, MoveContext};
use crate::protocol::{RequestError, SolveRequest, TransferPath};
use crate::search::{run_beam, run_hold, select_diverse};
use crate::squad::{BeamState, ChipPlan, Gameweek, PlayerCatalog, PlayerId, Projections, SquadRules};

/// Everything one solve needs.
#[derive(Debug, Clone)]
pub struct Problem {
    pub catalog: PlayerCatalog,
    pub projections: Projections,
    pub rules: SquadRules,
    pub squad: Vec<PlayerId>,
    /// Bank in tenths of a currency unit.
    pub bank: i32,
    pub free_transfers: u8,
    pub horizon: Vec<Gameweek>,
    pub fixed: FixedTransfers,
    pub chips: ChipPlan,
    pub filter: CandidateFilter,
    pub config: SearchConfig,
}

impl Problem {
    /// The state every plan starts from.
    pub fn root(&self) -> BeamState {
        BeamState::initial(self.squad.clone(), self.bank, self.free_transfers)
    }
}

/// Runs the search and returns up to `config.paths` distinct plans, best
/// first. Path ids start at 1.
pub fn solve(problem: &Problem) -> Vec<TransferPath> {
    let start = Instant::now();
    for (gw, chip) in problem.chips.iter() {
        debug!("gw {}: {} planned", gw, chip);
    }
    for (gw, out_id, in_id) in problem.fixed.iter() {
        debug!("gw {}: fixed transfer {} -> {}", gw, out_id, in_id);
    }

    let pools = CandidatePools::build(
        &problem.catalog,
        &problem.projections,
        &problem.horizon,
        &problem.squad,
        &problem.filter,
        &problem.config,
    );
    let ctx = MoveContext {
        eval: EvalContext::new(&problem.catalog, &problem.projections, &problem.rules),
        config: &problem.config,
        horizon: &problem.horizon,
        pools: &pools,
        filter: &problem.filter,
        fixed: &problem.fixed,
        chips: &problem.chips,
    };

    let hold = run_hold(&ctx, problem.root());
    let beam = run_beam(&ctx, problem.root());
    let chosen = select_diverse(&beam, problem.config.paths, problem.config.min_path_difference);

    let paths: Vec<TransferPath> = chosen
        .into_iter()
        .enumerate()
        .map(|(i, state)| TransferPath::from_state(i + 1, state, hold.display_score, &problem.catalog))
        .collect();

    info!(
        "{} gameweeks at {} depth: {} paths, best {:.2} (hold {:.2}) in {} ms",
        problem.horizon.len(),
        problem.config.depth,
        paths.len(),
        paths.first().map_or(0.0, |p| p.total_score),
        hold.display_score,
        start.elapsed().as_millis()
    );
    paths
}

/// Validates a request and solves it.
pub fn solve_request(request: SolveRequest) -> Result<Vec<TransferPath>, RequestError> {
    let problem = request.into_problem()?;
    Ok(solve(&problem))
}
