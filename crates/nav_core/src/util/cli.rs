use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::search::astar::Mode;

#[derive(Parser)]
#[command(version, about = "Plan a route over a waypoint graph", long_about = None)]
struct Cli {
    /// Path to the waypoints .csv file
    nodes_file: String,

    /// Path to the connections .csv file
    edges_file: String,

    /// ID of the start waypoint
    start: u64,

    /// ID of the goal waypoint
    goal: u64,

    /// Search mode. Possible values are "best-result" and "quick-compute"
    #[arg(short, long, value_name = "mode")]
    mode: Option<String>,

    /// Abort the search after this many path expansions
    #[arg(short, long, value_name = "n")]
    budget: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub nodes_file: PathBuf,
    pub edges_file: PathBuf,
    pub start: u64,
    pub goal: u64,
    pub mode: Mode,
    pub budget: Option<usize>,
}

pub fn parse() -> Result<Cfg> {
    let cli = Cli::parse();

    let mode = match cli.mode.as_deref() {
        Some(name) => name.parse::<Mode>()?,
        None => Mode::default(),
    };

    Ok(Cfg {
        nodes_file: PathBuf::from(cli.nodes_file),
        edges_file: PathBuf::from(cli.edges_file),
        start: cli.start,
        goal: cli.goal,
        mode,
        budget: cli.budget,
    })
}
