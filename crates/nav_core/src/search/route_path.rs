//! The per-search path value type.

use crate::constants::Distance;
use crate::waypoint::WaypointId;

/// An ordered route from a start waypoint up to the current frontier node,
/// together with the cost bookkeeping the search needs.
///
/// `cost` is the ground distance actually traveled along the route so far;
/// `total_estimate` adds the heuristic distance from the last node to the
/// goal, cached at the time of the last append. Paths are created fresh per
/// search, grow only through [`append`](RoutePath::append), and are cloned
/// whenever the search branches; a clone owns its route storage completely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutePath {
    route: Vec<WaypointId>,
    cost: Distance,
    total_estimate: Distance,
}

impl RoutePath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Extends the route by one node. `leg` is the travel cost from the
    /// current last node (zero for the very first node), `remaining` the
    /// heuristic distance from `node` to the goal.
    pub(crate) fn append(&mut self, node: WaypointId, leg: Distance, remaining: Distance) {
        debug_assert!(leg >= 0.0 && remaining >= 0.0);
        debug_assert!(!self.route.is_empty() || leg == 0.0);

        self.cost += leg;
        self.route.push(node);
        self.total_estimate = self.cost + remaining;
    }

    /// The waypoints of this path in travel order.
    pub fn route(&self) -> &[WaypointId] {
        &self.route
    }

    /// Ground distance traveled along the route so far.
    pub fn cost(&self) -> Distance {
        self.cost
    }

    /// `cost` plus the cached heuristic distance from the last node to the
    /// goal; the sort key of the exhaustive search.
    pub fn total_estimate(&self) -> Distance {
        self.total_estimate
    }

    pub fn last(&self) -> Option<WaypointId> {
        self.route.last().copied()
    }

    pub fn contains(&self, node: WaypointId) -> bool {
        self.route.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Whether this path ends at `goal`.
    ///
    /// This is an identity check on the last node. The heuristic of the goal
    /// to itself is zero, so it coincides with `cost == total_estimate`, but
    /// without resting on exact floating-point equality.
    pub fn reaches(&self, goal: WaypointId) -> bool {
        self.last() == Some(goal)
    }
}
