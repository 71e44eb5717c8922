use anyhow::Result;
use log::info;

use nav_core::graph::RouteGraph;
use nav_core::search::astar::AStarPlanner;
use nav_core::search::Planner;
use nav_core::util::cli;

fn main() -> Result<()> {
    env_logger::init();

    let cfg = cli::parse()?;

    let graph = RouteGraph::from_csv(&cfg.nodes_file, &cfg.edges_file)?;
    info!(
        "Graph has {} waypoints and {} connections",
        graph.node_count(),
        graph.connection_count()
    );

    let mut planner = AStarPlanner::with_mode(&graph, cfg.mode);
    if let Some(budget) = cfg.budget {
        planner = planner.with_budget(budget);
    }

    match planner.find_path(cfg.start.into(), cfg.goal.into())? {
        Some(path) => {
            for id in path.route() {
                println!("{}", graph.waypoint(*id).unwrap());
            }
            println!("Cost: {:.1} m", path.cost());
            println!("Took: {:?}", planner.stats.duration);
        }
        None => println!("No route found"),
    }

    Ok(())
}
