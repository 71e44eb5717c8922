//! Search strategies over a [`RouteGraph`](crate::graph::RouteGraph) and the
//! contract they share.

use thiserror::Error;

use crate::waypoint::WaypointId;

use self::route_path::RoutePath;

pub mod astar;
pub mod route_path;

/// Failures of a search that are NOT the soft "no route exists" outcome.
///
/// A missing start/goal or an unreachable goal is reported as `Ok(None)` by
/// [`Planner::find_path`]; these variants cover caller bugs and aborted
/// searches.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A configuration named a search mode this planner does not know.
    #[error("unknown search mode `{0}`")]
    UnknownMode(String),
    /// The search gave up after the configured number of expansions.
    #[error("search budget of {0} expansions exhausted")]
    BudgetExhausted(usize),
}

/// Result of a route query: a path, the soft "no route" outcome, or an error.
pub type PlanResult = Result<Option<RoutePath>, PlanError>;

/// The path finding contract.
///
/// If `start` or `goal` is not registered in the graph the result is
/// `Ok(None)`, without running a search. Implementations never panic on
/// disconnected graphs.
pub trait Planner {
    fn find_path(&mut self, start: WaypointId, goal: WaypointId) -> PlanResult;
}

#[cfg(test)]
pub(crate) fn assert_route(expected: Vec<u64>, expected_cost: crate::constants::Distance, result: PlanResult) {
    let path = result
        .expect("search must not fail")
        .expect("expected a route");
    let ids: Vec<u64> = path.route().iter().map(|id| id.value()).collect();
    assert_eq!(expected, ids);
    approx::assert_relative_eq!(expected_cost, path.cost(), max_relative = 1e-9);
}

#[cfg(test)]
pub(crate) fn assert_no_route(result: PlanResult) {
    assert!(result.expect("search must not fail").is_none());
}
