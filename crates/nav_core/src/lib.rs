//! Route planning over geodetic waypoint graphs.
//!
//! A [`RouteGraph`](graph::RouteGraph) is built from repeated
//! [`add_connection`](graph::RouteGraph::add_connection) calls and then
//! searched with an [`AStarPlanner`](search::astar::AStarPlanner) in one of
//! two modes: the exhaustive [`BestResult`](search::astar::Mode::BestResult)
//! strategy returns the cost-minimal route, the greedy
//! [`QuickCompute`](search::astar::Mode::QuickCompute) strategy trades
//! optimality for speed. Travel cost is always the great-circle distance
//! between the endpoint coordinates, derived at query time.
//!
//! # Basic usage
//! ```
//! use nav_core::prelude::*;
//!
//! let mut g = RouteGraph::new();
//! let erding = Waypoint::new(waypoint_id(0), 48.3222, 11.9487, 463.0);
//! let landshut = Waypoint::new(waypoint_id(1), 48.5114, 12.0333, 393.0);
//! let straubing = Waypoint::new(waypoint_id(2), 48.9008, 12.5167, 350.0);
//! g.add_connection(erding.clone(), landshut.clone());
//! g.add_connection(landshut, straubing.clone());
//!
//! let mut planner = AStarPlanner::new(&g);
//! let route = planner
//!     .find_path(erding.id, straubing.id)
//!     .expect("search ran within budget")
//!     .expect("the waypoints are connected");
//!
//! assert_eq!(route.route().len(), 3);
//! ```
pub mod constants;
pub mod geo;
pub mod graph;
pub mod prelude;
pub mod search;
pub mod statistics;
pub mod util;
pub mod waypoint;
