//! Shared fixture graphs for tests, examples and measurements.

use rand::Rng;

use crate::graph::RouteGraph;
use crate::waypoint;
use crate::waypoint::Waypoint;

fn connect_both(g: &mut RouteGraph, a: &Waypoint, b: &Waypoint) {
    g.add_connection(a.clone(), b.clone());
    g.add_connection(b.clone(), a.clone());
}

/// Three waypoints on the equator one degree apart, connected A -> B -> C.
pub fn equator_line_graph() -> RouteGraph {
    let a = waypoint!(0u64, 0.0, 0.0, 0.0);
    let b = waypoint!(1u64, 0.0, 1.0, 0.0);
    let c = waypoint!(2u64, 0.0, 2.0, 0.0);

    let mut g = RouteGraph::new();
    g.add_connection(a, b.clone());
    g.add_connection(b, c);
    g
}

/// A small mesh of Bavarian airfields with two-way connections.
pub fn bavaria_graph() -> RouteGraph {
    let schleissheim = waypoint!(0u64, 48.2397, 11.5614, 484.0);
    let erding = waypoint!(1u64, 48.3222, 11.9487, 463.0);
    let landshut = waypoint!(2u64, 48.5114, 12.0333, 393.0);
    let muehldorf = waypoint!(3u64, 48.2797, 12.4970, 407.0);
    let vilshofen = waypoint!(4u64, 48.6350, 13.1956, 301.0);
    let straubing = waypoint!(5u64, 48.9008, 12.5167, 350.0);
    let eggenfelden = waypoint!(6u64, 48.3964, 12.7236, 416.0);
    let jesenwang = waypoint!(7u64, 48.1739, 11.1256, 560.0);

    let mut g = RouteGraph::new();
    connect_both(&mut g, &jesenwang, &schleissheim);
    connect_both(&mut g, &schleissheim, &erding);
    connect_both(&mut g, &erding, &landshut);
    connect_both(&mut g, &erding, &muehldorf);
    connect_both(&mut g, &landshut, &straubing);
    connect_both(&mut g, &landshut, &muehldorf);
    connect_both(&mut g, &muehldorf, &eggenfelden);
    connect_both(&mut g, &eggenfelden, &vilshofen);
    connect_both(&mut g, &straubing, &vilshofen);
    g
}

/// Random waypoint field: a directed ring through all `n` nodes so every
/// pair is connected, plus `extra_links` random chords.
pub fn random_route_graph(n: usize, extra_links: usize, rng: &mut impl Rng) -> RouteGraph {
    assert!(n >= 2);

    let nodes: Vec<Waypoint> = (0..n)
        .map(|i| {
            waypoint!(
                i as u64,
                rng.gen_range(-60.0..60.0),
                rng.gen_range(-179.0..179.0),
                rng.gen_range(0.0..3000.0)
            )
        })
        .collect();

    let mut g = RouteGraph::with_capacity(n);
    for i in 0..n {
        g.add_connection(nodes[i].clone(), nodes[(i + 1) % n].clone());
    }
    for _ in 0..extra_links {
        let i = rng.gen_range(0..n);
        let j = rng.gen_range(0..n);
        if i != j {
            g.add_connection(nodes[i].clone(), nodes[j].clone());
        }
    }
    g
}
