//! Swarmsim command-line entry point.
//!
//! Runs the topology builder or the swarm simulator from CLI flags or a
//! YAML scenario file, prints the text report, and optionally writes JSON
//! and text reports to an output directory.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use swarmsim::analysis::report;
use swarmsim::config::{self, SwarmParams, TopologyParams};
use swarmsim::swarm;
use swarmsim::topology;
use swarmsim::utils::validation;

/// Discrete-event simulator for peer-to-peer overlay formation and piece propagation
#[derive(Parser, Debug)]
#[command(name = "swarmsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RNG seed; a random seed is drawn and logged when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Directory for JSON and text reports
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a randomized degree-bounded topology and report per-vertex counters
    Topology {
        /// Number of vertices
        #[arg(long, default_value = "50")]
        vertices: usize,

        /// Edges per vertex
        #[arg(long, default_value = "10")]
        degree: usize,
    },

    /// Simulate piece propagation across a procedurally connected swarm
    Swarm {
        /// Total number of peers
        #[arg(long, default_value = "5000")]
        peers: usize,

        /// Total number of pieces
        #[arg(long, default_value = "125")]
        pieces: usize,

        /// Pieces uploaded/downloaded per peer per round
        #[arg(long, default_value = "10")]
        transmit_limit: usize,

        /// Number of peers a joiner tries to connect to
        #[arg(long, default_value = "5")]
        soft_conn_limit: usize,

        /// Max number of connections a peer accepts
        #[arg(long, default_value = "20")]
        hard_conn_limit: usize,
    },

    /// Run the simulations described by a YAML scenario file
    Scenario {
        /// Path to the scenario YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging from the requested filter level
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.clone())).init();

    match &cli.command {
        Commands::Topology { vertices, degree } => {
            let params = TopologyParams {
                vertex_count: *vertices,
                degree: *degree,
            };
            let seed = resolve_seed(cli.seed, None);
            run_topology(&params, seed, cli.output.as_deref())?;
        }
        Commands::Swarm {
            peers,
            pieces,
            transmit_limit,
            soft_conn_limit,
            hard_conn_limit,
        } => {
            let params = SwarmParams {
                peer_count: *peers,
                piece_count: *pieces,
                transmit_limit: *transmit_limit,
                soft_conn_limit: *soft_conn_limit,
                hard_conn_limit: *hard_conn_limit,
            };
            let seed = resolve_seed(cli.seed, None);
            run_swarm(&params, seed, cli.output.as_deref())?;
        }
        Commands::Scenario { config } => {
            let scenario = config::load_scenario(config)?;
            let seed = resolve_seed(cli.seed, scenario.seed);

            if let Some(params) = &scenario.topology {
                run_topology(params, seed, cli.output.as_deref())?;
            }
            if let Some(params) = &scenario.swarm {
                run_swarm(params, seed, cli.output.as_deref())?;
            }
        }
    }

    Ok(())
}

/// Resolve the run seed: CLI flag, then scenario file, then a random draw
/// that is logged so the run stays replayable.
fn resolve_seed(flag: Option<u64>, scenario: Option<u64>) -> u64 {
    match flag.or(scenario) {
        Some(seed) => {
            info!("Using seed {}", seed);
            seed
        }
        None => {
            let seed = rand::thread_rng().gen();
            info!("No seed given, drew seed {}", seed);
            seed
        }
    }
}

fn run_topology(
    params: &TopologyParams,
    seed: u64,
    output: Option<&std::path::Path>,
) -> Result<()> {
    params.validate()?;
    validation::check_topology_feasibility(params);

    info!(
        "Building topology: {} vertices, target degree {}",
        params.vertex_count, params.degree
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let graph = topology::build(params, &mut rng)?;

    let topology_report = report::build_topology_report(&graph, params.degree, seed);
    let text = report::render_topology_text(&topology_report);
    println!("{}", text);

    if let Some(dir) = output {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create output directory '{}'", dir.display()))?;
        report::generate_json_report(&topology_report, &dir.join("topology_report.json"))?;
        report::generate_text_report(&text, &dir.join("topology_report.txt"))?;
    }

    Ok(())
}

fn run_swarm(params: &SwarmParams, seed: u64, output: Option<&std::path::Path>) -> Result<()> {
    params.validate()?;
    validation::check_swarm_feasibility(params);

    info!(
        "Building swarm: {} peers, {} pieces, transmit limit {}, connection limits {}/{}",
        params.peer_count,
        params.piece_count,
        params.transmit_limit,
        params.soft_conn_limit,
        params.hard_conn_limit
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut swarm = swarm::build_peers(params, &mut rng);
    swarm.run(&mut rng);

    let swarm_report = report::build_swarm_report(&swarm, seed);
    let text = report::render_swarm_text(&swarm_report);
    println!("{}", text);

    if let Some(dir) = output {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create output directory '{}'", dir.display()))?;
        report::generate_json_report(&swarm_report, &dir.join("swarm_report.json"))?;
        report::generate_text_report(&text, &dir.join("swarm_report.txt"))?;
    }

    Ok(())
}
