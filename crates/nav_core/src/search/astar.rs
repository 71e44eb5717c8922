//! A* route planning in two strategies: an exhaustive best-first search and
//! a greedy single-expansion search.

use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::constants::Distance;
use crate::graph::RouteGraph;
use crate::statistics::SearchStats;
use crate::waypoint::WaypointId;

use super::route_path::RoutePath;
use super::{PlanError, PlanResult, Planner};

/// Search strategy of the planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Frontier-complete A*. Returns the route with minimal cost; may expand
    /// a large number of candidate paths to prove it.
    #[default]
    BestResult,
    /// Greedy descent on the remaining distance with backtracking out of
    /// dead ends. Fast, but the returned route carries no optimality
    /// guarantee.
    QuickCompute,
}

impl FromStr for Mode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" | "best-result" => Ok(Mode::BestResult),
            "quick" | "quick-compute" => Ok(Mode::QuickCompute),
            other => Err(PlanError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::BestResult => write!(f, "best-result"),
            Mode::QuickCompute => write!(f, "quick-compute"),
        }
    }
}

/// Frontier entry. The heap is a max-heap, so the ordering is reversed to
/// pop the path with the lowest total estimate first. Ties are unordered.
#[derive(Debug)]
struct Candidate {
    path: RoutePath,
}

impl Candidate {
    fn new(path: RoutePath) -> Self {
        Self { path }
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        other
            .path
            .total_estimate()
            .partial_cmp(&self.path.total_estimate())
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        other.path.total_estimate() == self.path.total_estimate()
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .path
            .total_estimate()
            .partial_cmp(&self.path.total_estimate())
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// A* planner over a [`RouteGraph`].
///
/// The heuristic is the remaining ground distance to the goal, which never
/// overestimates the true remaining cost and satisfies the triangle
/// inequality, so [`Mode::BestResult`] returns a cost-minimal route.
///
/// The planner borrows the graph immutably; every search owns its frontier,
/// closed set and distance memo, so separate planner instances may search
/// one shared graph concurrently.
pub struct AStarPlanner<'a> {
    pub stats: SearchStats,
    g: &'a RouteGraph,
    mode: Mode,
    budget: Option<usize>,
}

impl<'a> AStarPlanner<'a> {
    pub fn new(graph: &'a RouteGraph) -> Self {
        Self::with_mode(graph, Mode::default())
    }

    pub fn with_mode(graph: &'a RouteGraph, mode: Mode) -> Self {
        AStarPlanner {
            stats: SearchStats::default(),
            g: graph,
            mode,
            budget: None,
        }
    }

    /// Caps the number of path expansions per search. An exceeded cap aborts
    /// the search with [`PlanError::BudgetExhausted`] instead of running
    /// until the frontier empties.
    pub fn with_budget(mut self, max_expansions: usize) -> Self {
        self.budget = Some(max_expansions);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn budget_exhausted(&self) -> Option<PlanError> {
        match self.budget {
            Some(limit) if self.stats.paths_expanded >= limit => {
                Some(PlanError::BudgetExhausted(limit))
            }
            _ => None,
        }
    }

    /// Exhaustive best-first search over whole candidate paths.
    fn best_result(&mut self, start: WaypointId, goal: WaypointId) -> PlanResult {
        info!("BEGIN BEST RESULT SEARCH from {:?} to {:?}", start, goal);
        self.stats.init();

        let g = self.g;
        let goal_wp = g.waypoint(goal).unwrap();

        // Distance to goal per visited node, computed once
        let mut remaining: FxHashMap<WaypointId, Distance> = FxHashMap::default();
        let start_estimate = g.waypoint(start).unwrap().ground_distance_to(goal_wp);
        remaining.insert(start, start_estimate);

        let mut initial = RoutePath::new();
        initial.append(start, 0.0, start_estimate);

        let mut frontier = BinaryHeap::new();
        frontier.push(Candidate::new(initial));

        while let Some(Candidate { path }) = frontier.pop() {
            if path.reaches(goal) {
                self.stats.finish();
                info!("{}, cost: {}", self.stats, path.cost());
                return Ok(Some(path));
            }

            if let Some(err) = self.budget_exhausted() {
                self.stats.finish();
                info!("Search aborted: {}", err);
                return Err(err);
            }
            self.stats.paths_expanded += 1;

            let last = path.last().unwrap();
            let last_wp = g.waypoint(last).unwrap();
            for &next in g.neighbors(last) {
                // No cycles within a single path
                if path.contains(next) {
                    continue;
                }
                let next_wp = g.waypoint(next).unwrap();
                let estimate = *remaining
                    .entry(next)
                    .or_insert_with(|| next_wp.ground_distance_to(goal_wp));

                let mut branch = path.clone();
                branch.append(next, last_wp.ground_distance_to(next_wp), estimate);
                frontier.push(Candidate::new(branch));
            }
        }

        self.stats.finish();
        info!("No route found: {}", self.stats);
        Ok(None)
    }

    /// Greedy single-expansion search.
    ///
    /// Only the tail of the path stack is ever active. Each round either
    /// extends the tail by the eligible neighbor closest to the goal, or
    /// closes the tail's last node as a dead end and falls back to the
    /// previous prefix. Closing is permanent, so every node is closed at
    /// most once and the search always terminates.
    fn quick_compute(&mut self, start: WaypointId, goal: WaypointId) -> PlanResult {
        info!("BEGIN QUICK COMPUTE SEARCH from {:?} to {:?}", start, goal);
        self.stats.init();

        let g = self.g;
        let goal_wp = g.waypoint(goal).unwrap();

        let mut remaining: FxHashMap<WaypointId, Distance> = FxHashMap::default();
        let start_estimate = g.waypoint(start).unwrap().ground_distance_to(goal_wp);
        remaining.insert(start, start_estimate);

        let mut initial = RoutePath::new();
        initial.append(start, 0.0, start_estimate);

        let mut stack = vec![initial];
        let mut closed: FxHashSet<WaypointId> = FxHashSet::default();

        loop {
            let Some(tail) = stack.last() else {
                break;
            };

            if tail.reaches(goal) {
                let path = stack.pop().unwrap();
                self.stats.finish();
                info!("{}, cost: {}", self.stats, path.cost());
                return Ok(Some(path));
            }

            if let Some(err) = self.budget_exhausted() {
                self.stats.finish();
                info!("Search aborted: {}", err);
                return Err(err);
            }
            self.stats.paths_expanded += 1;

            let last = tail.last().unwrap();

            // Single best next hop: the eligible neighbor closest to the
            // goal, first one wins on ties
            let mut best: Option<(WaypointId, Distance)> = None;
            if !closed.contains(&last) {
                for &next in g.neighbors(last) {
                    if closed.contains(&next) || tail.contains(next) {
                        continue;
                    }
                    let estimate = *remaining.entry(next).or_insert_with(|| {
                        g.waypoint(next).unwrap().ground_distance_to(goal_wp)
                    });
                    if best.map_or(true, |(_, d)| estimate < d) {
                        best = Some((next, estimate));
                    }
                }
            }

            match best {
                Some((next, estimate)) => {
                    let last_wp = g.waypoint(last).unwrap();
                    let leg = last_wp.ground_distance_to(g.waypoint(next).unwrap());
                    let mut extended = tail.clone();
                    extended.append(next, leg, estimate);
                    stack.push(extended);
                }
                None => {
                    // Dead end: block the node for the rest of this search
                    // and fall back to the previous prefix
                    debug!("Closing dead end {:?}", last);
                    closed.insert(last);
                    stack.pop();
                }
            }
        }

        self.stats.finish();
        info!("No route found: {}", self.stats);
        Ok(None)
    }
}

impl Planner for AStarPlanner<'_> {
    fn find_path(&mut self, start: WaypointId, goal: WaypointId) -> PlanResult {
        if !self.g.contains(start) || !self.g.contains(goal) {
            debug!(
                "Start {:?} or goal {:?} is not part of the graph",
                start, goal
            );
            return Ok(None);
        }

        match self.mode {
            Mode::BestResult => self.best_result(start, goal),
            Mode::QuickCompute => self.quick_compute(start, goal),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::search::{assert_no_route, assert_route};
    use crate::util::test_graphs::{bavaria_graph, equator_line_graph, random_route_graph};
    use crate::waypoint;
    use crate::waypoint::waypoint_id;

    use super::*;

    #[test]
    fn line_route_found_by_both_modes() {
        // A -> B -> C, one degree apart on the equator
        let g = equator_line_graph();
        let ab = g
            .waypoint(waypoint_id(0))
            .unwrap()
            .ground_distance_to(g.waypoint(waypoint_id(1)).unwrap());
        let bc = g
            .waypoint(waypoint_id(1))
            .unwrap()
            .ground_distance_to(g.waypoint(waypoint_id(2)).unwrap());

        let mut best = AStarPlanner::new(&g);
        assert_route(vec![0, 1, 2], ab + bc, best.find_path(0.into(), 2.into()));

        let mut quick = AStarPlanner::with_mode(&g, Mode::QuickCompute);
        assert_route(vec![0, 1, 2], ab + bc, quick.find_path(0.into(), 2.into()));
    }

    #[test]
    fn start_equals_goal() {
        let g = equator_line_graph();

        for mode in [Mode::BestResult, Mode::QuickCompute] {
            let mut planner = AStarPlanner::with_mode(&g, mode);
            assert_route(vec![1], 0.0, planner.find_path(1.into(), 1.into()));
        }
    }

    #[test]
    fn unknown_endpoints_are_not_found() {
        let g = equator_line_graph();

        for mode in [Mode::BestResult, Mode::QuickCompute] {
            let mut planner = AStarPlanner::with_mode(&g, mode);
            assert_no_route(planner.find_path(0.into(), 99.into()));
            assert_no_route(planner.find_path(99.into(), 0.into()));
        }
    }

    #[test]
    fn connections_are_directed() {
        // A -> B -> C has no way back from C
        let g = equator_line_graph();

        for mode in [Mode::BestResult, Mode::QuickCompute] {
            let mut planner = AStarPlanner::with_mode(&g, mode);
            assert_no_route(planner.find_path(2.into(), 0.into()));
        }
    }

    #[test]
    fn disconnected_graph() {
        // 0 -> 1    2 -> 3
        let mut g = crate::graph::RouteGraph::new();
        g.add_connection(
            waypoint!(0u64, 0.0, 0.0, 0.0),
            waypoint!(1u64, 0.0, 1.0, 0.0),
        );
        g.add_connection(
            waypoint!(2u64, 10.0, 0.0, 0.0),
            waypoint!(3u64, 10.0, 1.0, 0.0),
        );

        for mode in [Mode::BestResult, Mode::QuickCompute] {
            let mut planner = AStarPlanner::with_mode(&g, mode);
            assert_no_route(planner.find_path(0.into(), 3.into()));
            assert_no_route(planner.find_path(2.into(), 1.into()));
        }
    }

    #[test]
    fn greedy_trap_shows_optimality_gap() {
        // G sits due east of A. B looks closest to G from A, but the hop
        // through B travels further overall than the equator route via C.
        //
        //        B
        //       / \
        //  A --+   +-- G
        //       \ /
        //        C
        let a = waypoint!(0u64, 0.0, 0.0, 0.0);
        let b = waypoint!(1u64, 2.0, 6.0, 0.0);
        let c = waypoint!(2u64, 0.0, 5.0, 0.0);
        let goal = waypoint!(3u64, 0.0, 10.0, 0.0);

        let mut g = crate::graph::RouteGraph::new();
        g.add_connection(a.clone(), b.clone());
        g.add_connection(a.clone(), c.clone());
        g.add_connection(b.clone(), goal.clone());
        g.add_connection(c.clone(), goal.clone());

        let mut quick = AStarPlanner::with_mode(&g, Mode::QuickCompute);
        let quick_path = quick
            .find_path(a.id, goal.id)
            .unwrap()
            .expect("greedy search reaches the goal");
        let quick_ids: Vec<u64> = quick_path.route().iter().map(|id| id.value()).collect();
        assert_eq!(quick_ids, vec![0, 1, 3]);

        let mut best = AStarPlanner::new(&g);
        let best_path = best
            .find_path(a.id, goal.id)
            .unwrap()
            .expect("optimal search reaches the goal");
        let best_ids: Vec<u64> = best_path.route().iter().map(|id| id.value()).collect();
        assert_eq!(best_ids, vec![0, 2, 3]);

        assert!(best_path.cost() < quick_path.cost());
    }

    #[test]
    fn quick_compute_backtracks_out_of_dead_ends() {
        // B is the nearest neighbor to G but leads nowhere; the greedy
        // search has to close it and fall back to the route via C.
        //
        //        B
        //       /
        //  A --+
        //       \
        //        C -- G
        let a = waypoint!(0u64, 0.0, 0.0, 0.0);
        let b = waypoint!(1u64, 0.1, 8.0, 0.0);
        let c = waypoint!(2u64, 0.0, 5.0, 0.0);
        let goal = waypoint!(3u64, 0.0, 10.0, 0.0);

        let mut g = crate::graph::RouteGraph::new();
        g.add_connection(a.clone(), b.clone());
        g.add_connection(a.clone(), c.clone());
        g.add_connection(c.clone(), goal.clone());

        let mut quick = AStarPlanner::with_mode(&g, Mode::QuickCompute);
        let path = quick
            .find_path(a.id, goal.id)
            .unwrap()
            .expect("dead end must not kill the search");
        let ids: Vec<u64> = path.route().iter().map(|id| id.value()).collect();
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn mesh_route_best_never_costs_more() {
        let g = bavaria_graph();

        let mut best = AStarPlanner::new(&g);
        let best_path = best.find_path(7.into(), 4.into()).unwrap().unwrap();

        let mut quick = AStarPlanner::with_mode(&g, Mode::QuickCompute);
        let quick_path = quick.find_path(7.into(), 4.into()).unwrap().unwrap();

        assert!(best_path.cost() <= quick_path.cost() + 1e-6);
    }

    #[test]
    fn budget_exhaustion_is_reported() {
        let g = equator_line_graph();

        for mode in [Mode::BestResult, Mode::QuickCompute] {
            let mut planner = AStarPlanner::with_mode(&g, mode).with_budget(1);
            assert_eq!(
                planner.find_path(0.into(), 2.into()),
                Err(PlanError::BudgetExhausted(1))
            );
        }
    }

    #[test]
    fn trivial_search_fits_any_budget() {
        let g = equator_line_graph();

        let mut planner = AStarPlanner::new(&g).with_budget(0);
        assert_route(vec![0], 0.0, planner.find_path(0.into(), 0.into()));
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("best-result".parse::<Mode>(), Ok(Mode::BestResult));
        assert_eq!("best".parse::<Mode>(), Ok(Mode::BestResult));
        assert_eq!("quick-compute".parse::<Mode>(), Ok(Mode::QuickCompute));
        assert_eq!("quick".parse::<Mode>(), Ok(Mode::QuickCompute));
        assert_eq!(
            "fastest".parse::<Mode>(),
            Err(PlanError::UnknownMode("fastest".to_string()))
        );
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in [Mode::BestResult, Mode::QuickCompute] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Whenever the greedy search finds a route, the exhaustive search
        /// finds one too and never at a higher cost.
        #[test]
        fn best_result_dominates_quick_compute(seed in 0u64..500) {
            let mut rng = StdRng::seed_from_u64(seed);
            let g = random_route_graph(12, 6, &mut rng);

            let start = waypoint_id(0);
            let goal = waypoint_id(6);

            let mut quick = AStarPlanner::with_mode(&g, Mode::QuickCompute);
            if let Some(quick_path) = quick.find_path(start, goal).unwrap() {
                let mut best = AStarPlanner::new(&g);
                let best_path = best
                    .find_path(start, goal)
                    .unwrap()
                    .expect("optimal search finds a route whenever greedy does");
                prop_assert!(best_path.cost() <= quick_path.cost() + 1e-6);
            }
        }
    }
}
