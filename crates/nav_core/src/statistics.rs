//! Search timing and graph degree diagnostics.

use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use histogram::Histogram;
use rustc_hash::FxHashMap;

use crate::graph::RouteGraph;
use crate::waypoint::WaypointId;

#[derive(Debug, Default)]
pub struct SearchStats {
    pub paths_expanded: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.paths_expanded = 0;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} paths expanded in {:?}",
            self.paths_expanded, self.duration
        )
    }
}

pub fn degree_out_hist(g: &RouteGraph) -> Histogram {
    let hist = Histogram::new(0, 10, 30).unwrap();
    for waypoint in g.waypoints() {
        let degree = g.neighbors(waypoint.id).len();
        hist.increment(degree as u64, 1).unwrap();
    }
    hist
}

pub fn degree_in_hist(g: &RouteGraph) -> Histogram {
    let mut in_degrees: FxHashMap<WaypointId, u64> = FxHashMap::default();
    for waypoint in g.waypoints() {
        for &target in g.neighbors(waypoint.id) {
            *in_degrees.entry(target).or_default() += 1;
        }
    }

    let hist = Histogram::new(0, 10, 30).unwrap();
    for waypoint in g.waypoints() {
        let degree = in_degrees.get(&waypoint.id).copied().unwrap_or(0);
        hist.increment(degree, 1).unwrap();
    }
    hist
}

pub fn average_out_degree(g: &RouteGraph) -> f64 {
    g.connection_count() as f64 / g.node_count() as f64
}
