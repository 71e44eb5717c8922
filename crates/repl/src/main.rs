//! Interactive shell for route planning experiments
use std::path::{Path, PathBuf};

use nav_core::graph::RouteGraph;
use nav_core::search::astar::{AStarPlanner, Mode};
use nav_core::search::Planner;
use nav_core::waypoint::WaypointId;
use reedline_repl_rs::clap::{value_parser, Arg, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};

struct Context {
    graph: RouteGraph,
}

impl Context {
    fn new(graph: RouteGraph) -> Self {
        Self { graph }
    }
}

/// Print graph info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    Ok(Some(format!(
        "Graph has {} waypoints and {} connections",
        context.graph.node_count(),
        context.graph.connection_count()
    )))
}

fn run_route(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let start = *args.get_one::<u64>("start").unwrap();
    let goal = *args.get_one::<u64>("goal").unwrap();
    let mode = match args
        .get_one::<String>("mode")
        .map(|name| name.parse::<Mode>())
    {
        Some(Ok(mode)) => mode,
        Some(Err(err)) => return Ok(Some(err.to_string())),
        None => Mode::default(),
    };

    let mut planner = AStarPlanner::with_mode(&context.graph, mode);
    match planner.find_path(start.into(), goal.into()) {
        Ok(Some(path)) => {
            let mut out = String::new();
            for id in path.route() {
                out.push_str(&format!("{}\n", context.graph.waypoint(*id).unwrap()));
            }
            out.push_str(&format!("Cost: {:.1} m\n", path.cost()));
            out.push_str(&format!("Took: {:?}", planner.stats.duration));
            Ok(Some(out))
        }
        Ok(None) => Ok(Some("No route found".to_string())),
        Err(err) => Ok(Some(err.to_string())),
    }
}

fn measure_routes(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    use rand::Rng;

    let n = *args.get_one::<usize>("n").unwrap_or(&10);

    // Select random start and goal waypoints
    let ids: Vec<WaypointId> = context.graph.waypoints().map(|w| w.id).collect();
    let mut rng = rand::thread_rng();

    let mut res = String::new();
    for _ in 0..n {
        let start = ids[rng.gen_range(0..ids.len())];
        let goal = ids[rng.gen_range(0..ids.len())];

        let mut planner = AStarPlanner::new(&context.graph);
        match planner.find_path(start, goal) {
            Ok(Some(path)) => res.push_str(&format!(
                "{} -> {}: {:.1} m in {:?}\n",
                start.value(),
                goal.value(),
                path.cost(),
                planner.stats.duration
            )),
            _ => continue,
        }
    }

    Ok(Some(res))
}

fn main() -> Result<()> {
    env_logger::init();

    // Init graph
    let nodes_file = std::env::args().nth(1).expect("No waypoint file given");
    let edges_file = std::env::args().nth(2).expect("No connection file given");
    let graph = RouteGraph::from_csv(Path::new(&nodes_file), Path::new(&edges_file)).unwrap();
    let context = Context::new(graph);

    let mut repl = Repl::new(context)
        .with_name("Routeplanner")
        .with_version("v0.1.0")
        .with_description("Simple REPL to test waypoint route planning")
        .with_banner("Welcome to Routeplanner")
        .with_history(PathBuf::from(".history"), 100)
        .with_command(Command::new("info").about("Print graph info"), info)
        .with_command(
            Command::new("route")
                .arg(
                    Arg::new("start")
                        .value_parser(value_parser!(u64))
                        .required(true)
                        .help("ID of the start waypoint"),
                )
                .arg(
                    Arg::new("goal")
                        .value_parser(value_parser!(u64))
                        .required(true)
                        .help("ID of the goal waypoint"),
                )
                .arg(
                    Arg::new("mode")
                        .required(false)
                        .help("Search mode: \"best-result\" or \"quick-compute\""),
                )
                .about("Plan a route between two waypoints"),
            run_route,
        )
        .with_command(
            Command::new("routem")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of random routes to plan"),
                )
                .about("Measure `n` random route calculations"),
            measure_routes,
        );

    repl.run()
}
