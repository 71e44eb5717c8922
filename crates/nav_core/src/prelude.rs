//! Re-exports of the most commonly used items in `nav_core`.
pub use crate::graph::RouteGraph;
pub use crate::search::astar::{AStarPlanner, Mode};
pub use crate::search::route_path::RoutePath;
pub use crate::search::{PlanError, Planner};
pub use crate::waypoint::{waypoint_id, Waypoint, WaypointId};

pub use crate::util::test_graphs::equator_line_graph;
