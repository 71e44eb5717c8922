//! The route graph: a vertex set of waypoints plus a directed adjacency map.
//!
//! The graph stores connectivity only. There are no edge weights on disk or
//! in memory; travel cost is always derived from the endpoint coordinates at
//! query time. `add_connection` is the single mutator, so the invariant that
//! every id referenced by the adjacency map is a registered vertex holds by
//! construction.

use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::waypoint::{Waypoint, WaypointId};

/// On-disk record of a waypoint, one row of the nodes file.
#[derive(Debug, Deserialize, Serialize)]
struct WaypointRecord {
    id: u64,
    lat: f64,
    lon: f64,
    alt: f64,
}

/// On-disk record of a directed connection, one row of the edges file.
#[derive(Debug, Deserialize, Serialize)]
struct ConnectionRecord {
    from: u64,
    to: u64,
}

/// Directed connectivity graph over [`Waypoint`]s.
///
/// Build the graph completely before searching it. A planner borrows the
/// graph immutably, so the borrow checker enforces the build-then-search
/// discipline; a finished graph can be shared by any number of concurrent
/// searches.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    nodes: FxHashMap<WaypointId, Waypoint>,
    adjacency: FxHashMap<WaypointId, Vec<WaypointId>>,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(num_nodes: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(num_nodes, Default::default()),
            adjacency: FxHashMap::with_capacity_and_hasher(num_nodes, Default::default()),
        }
    }

    /// Registers a directed connection from `from` to `to`.
    ///
    /// Both waypoints are added to the vertex set if not yet known (`from`
    /// first). The reverse connection is NOT created; call again with the
    /// arguments swapped for a two-way link. Idempotent: repeating a call
    /// changes nothing.
    pub fn add_connection(&mut self, from: Waypoint, to: Waypoint) {
        let from_id = from.id;
        let to_id = to.id;

        self.nodes.entry(from_id).or_insert(from);
        self.nodes.entry(to_id).or_insert(to);

        let targets = self.adjacency.entry(from_id).or_default();
        if !targets.contains(&to_id) {
            targets.push(to_id);
        }
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.nodes.get(&id)
    }

    /// Returns an iterator over all waypoints of the graph
    pub fn waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.nodes.values()
    }

    /// Directly reachable waypoints from `id`, in insertion order. Empty for
    /// unknown ids and for waypoints without outgoing connections.
    pub fn neighbors(&self, id: WaypointId) -> &[WaypointId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    pub fn from_csv(path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<Self> {
        info!("Parsing waypoint file: {:?}", path_to_nodes);

        let mut graph = RouteGraph::new();

        let mut reader = csv::Reader::from_path(path_to_nodes)?;
        for result in reader.deserialize() {
            let record: WaypointRecord = result.context("Failed to parse waypoint")?;
            let waypoint =
                Waypoint::new(record.id.into(), record.lat, record.lon, record.alt);
            // Registered directly so that waypoints without connections survive
            graph.nodes.insert(waypoint.id, waypoint);
        }

        let mut reader = csv::Reader::from_path(path_to_edges)?;
        for result in reader.deserialize() {
            let record: ConnectionRecord = result.context("Failed to parse connection")?;
            let from_id = WaypointId::new(record.from);
            let to_id = WaypointId::new(record.to);
            let from = graph
                .nodes
                .get(&from_id)
                .with_context(|| format!("Connection from unknown waypoint {}", record.from))?
                .clone();
            let to = graph
                .nodes
                .get(&to_id)
                .with_context(|| format!("Connection to unknown waypoint {}", record.to))?
                .clone();
            graph.add_connection(from, to);
        }

        info!(
            "Graph has {} waypoints and {} connections",
            graph.node_count(),
            graph.connection_count()
        );
        Ok(graph)
    }

    /// Writes the vertex and edge sets as CSV, ordered by waypoint id so the
    /// output is stable across runs.
    pub fn export_csv(&self, path_to_nodes: &Path, path_to_edges: &Path) -> anyhow::Result<()> {
        let mut ids: Vec<WaypointId> = self.nodes.keys().copied().collect();
        ids.sort();

        debug!("BEGIN writing waypoints");
        let mut wtr = csv::Writer::from_path(path_to_nodes)?;
        for id in &ids {
            let waypoint = &self.nodes[id];
            wtr.serialize(WaypointRecord {
                id: waypoint.id.value(),
                lat: waypoint.location.lat,
                lon: waypoint.location.lon,
                alt: waypoint.location.alt,
            })?;
        }
        wtr.flush()?;
        debug!("FINISHED writing waypoints");

        debug!("BEGIN writing connections");
        let mut wtr = csv::Writer::from_path(path_to_edges)?;
        for id in &ids {
            for target in self.neighbors(*id) {
                wtr.serialize(ConnectionRecord {
                    from: id.value(),
                    to: target.value(),
                })?;
            }
        }
        wtr.flush()?;
        debug!("FINISHED writing connections");
        Ok(())
    }
}

/// Macro to create a waypoint with a given id, lat, lon and altitude
///
/// waypoint!(0, 48.1372, 11.5755, 520.0)
#[macro_export]
macro_rules! waypoint {
    ($id:expr, $lat:expr, $lon:expr, $alt:expr) => {
        $crate::waypoint::Waypoint::new($id.into(), $lat, $lon, $alt)
    };
}
