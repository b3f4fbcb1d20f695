//! End-to-end tests over both simulation subsystems: structural
//! invariants, reproducibility under a fixed seed, and scenario-file
//! round-trips.

use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

use swarmsim::analysis::report;
use swarmsim::config::{self, SwarmParams, TopologyParams};
use swarmsim::swarm;
use swarmsim::topology;

/// Every edge must appear in both endpoints' neighbor sets.
fn assert_graph_symmetric(graph: &topology::Graph) {
    for vertex in &graph.vertices {
        for &neighbor in &vertex.neighbors {
            assert!(
                graph.vertices[neighbor].neighbors.contains(&vertex.id),
                "edge {} -> {} has no reverse entry",
                vertex.id,
                neighbor
            );
        }
    }
}

#[test]
fn topology_build_respects_capacity_and_symmetry() {
    let params = TopologyParams {
        vertex_count: 100,
        degree: 10,
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let graph = topology::build(&params, &mut rng).unwrap();

    assert_eq!(graph.vertices.len(), 100);
    assert_graph_symmetric(&graph);
    for vertex in &graph.vertices {
        assert!(
            vertex.degree() <= vertex.target_degree,
            "vertex {} exceeds its target degree",
            vertex.id
        );
        assert!(!vertex.neighbors.contains(&vertex.id), "self-loop found");
    }
}

#[test]
fn topology_rewiring_keeps_most_vertices_saturated() {
    // With 100 vertices at degree 10 the candidate pool is ample; rewiring
    // should leave at most the earliest arrivals under-degree.
    let params = TopologyParams {
        vertex_count: 100,
        degree: 10,
    };
    let mut rng = StdRng::seed_from_u64(5);

    let graph = topology::build(&params, &mut rng).unwrap();
    let under_degree = graph
        .vertices
        .iter()
        .filter(|v| v.degree() < v.target_degree)
        .count();

    assert!(
        under_degree <= params.degree,
        "{} vertices ended under-degree",
        under_degree
    );
}

#[test]
fn swarm_run_completes_and_reports_consistently() {
    let params = SwarmParams {
        peer_count: 40,
        piece_count: 12,
        transmit_limit: 3,
        soft_conn_limit: 4,
        hard_conn_limit: 10,
    };
    let mut rng = StdRng::seed_from_u64(31337);

    let mut swarm = swarm::build_peers(&params, &mut rng);
    let rounds = swarm.run(&mut rng);

    assert!(rounds <= swarm::MAX_ROUNDS);
    assert_eq!(swarm.all_complete, swarm.peers.iter().all(|p| p.is_done()));

    let swarm_report = report::build_swarm_report(&swarm, 31337);
    assert_eq!(swarm_report.total_rounds, rounds);
    assert_eq!(
        swarm_report.completed_peers + swarm_report.incomplete_peers.len(),
        params.peer_count
    );
}

#[test]
fn swarm_connection_graph_is_symmetric_and_hard_bounded() {
    let params = SwarmParams {
        peer_count: 200,
        piece_count: 1,
        transmit_limit: 1,
        soft_conn_limit: 5,
        hard_conn_limit: 20,
    };
    let mut rng = StdRng::seed_from_u64(8);

    let swarm = swarm::build_peers(&params, &mut rng);

    for peer in &swarm.peers {
        for &neighbor in &peer.neighbors {
            assert!(
                swarm.peers[neighbor].neighbors.contains(&peer.id),
                "edge {} -> {} has no reverse entry",
                peer.id,
                neighbor
            );
        }
    }
    // The hard limit binds at accept time, so no peer can end above it.
    for peer in &swarm.peers {
        assert!(
            peer.neighbors.len() <= params.hard_conn_limit,
            "peer {} holds {} connections",
            peer.id,
            peer.neighbors.len()
        );
    }
}

#[test]
fn identical_seeds_reproduce_both_subsystems() {
    let topology_params = TopologyParams {
        vertex_count: 50,
        degree: 10,
    };
    let swarm_params = SwarmParams {
        peer_count: 60,
        piece_count: 10,
        transmit_limit: 2,
        soft_conn_limit: 4,
        hard_conn_limit: 12,
    };

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = topology::build(&topology_params, &mut rng).unwrap();

        let mut rng = StdRng::seed_from_u64(seed);
        let mut swarm = swarm::build_peers(&swarm_params, &mut rng);
        let rounds = swarm.run(&mut rng);
        (graph, swarm, rounds)
    };

    let (graph_a, swarm_a, rounds_a) = run(99);
    let (graph_b, swarm_b, rounds_b) = run(99);

    assert_eq!(rounds_a, rounds_b);
    for (a, b) in graph_a.vertices.iter().zip(graph_b.vertices.iter()) {
        assert_eq!(a.neighbors, b.neighbors);
        assert_eq!(a.disconnects, b.disconnects);
    }
    for (a, b) in swarm_a.peers.iter().zip(swarm_b.peers.iter()) {
        assert_eq!(a.neighbors, b.neighbors);
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.finished_round, b.finished_round);
    }
}

#[test]
fn scenario_file_drives_both_simulations() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "seed: 7").unwrap();
    writeln!(file, "topology:").unwrap();
    writeln!(file, "  vertex_count: 20").unwrap();
    writeln!(file, "  degree: 4").unwrap();
    writeln!(file, "swarm:").unwrap();
    writeln!(file, "  peer_count: 20").unwrap();
    writeln!(file, "  piece_count: 5").unwrap();
    writeln!(file, "  transmit_limit: 2").unwrap();
    writeln!(file, "  soft_conn_limit: 3").unwrap();
    writeln!(file, "  hard_conn_limit: 8").unwrap();
    file.flush().unwrap();

    let scenario = config::load_scenario(file.path()).unwrap();
    let seed = scenario.seed.unwrap();

    let topology_params = scenario.topology.unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let graph = topology::build(&topology_params, &mut rng).unwrap();
    assert_eq!(graph.vertices.len(), 20);

    let swarm_params = scenario.swarm.unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut swarm = swarm::build_peers(&swarm_params, &mut rng);
    let rounds = swarm.run(&mut rng);
    assert!(rounds >= 1);
}

#[test]
fn reports_land_in_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();

    let params = TopologyParams {
        vertex_count: 10,
        degree: 3,
    };
    let mut rng = StdRng::seed_from_u64(4);
    let graph = topology::build(&params, &mut rng).unwrap();
    let topology_report = report::build_topology_report(&graph, params.degree, 4);

    let json_path = dir.path().join("topology_report.json");
    let text_path = dir.path().join("topology_report.txt");
    report::generate_json_report(&topology_report, &json_path).unwrap();
    report::generate_text_report(&report::render_topology_text(&topology_report), &text_path)
        .unwrap();

    let json = std::fs::read_to_string(&json_path).unwrap();
    assert!(json.contains("\"vertex_count\": 10"));
    let text = std::fs::read_to_string(&text_path).unwrap();
    assert!(text.contains("SWARMSIM TOPOLOGY REPORT"));
}

#[test]
fn seeded_peer_alone_holds_everything_at_start() {
    let params = SwarmParams {
        peer_count: 1,
        piece_count: 9,
        transmit_limit: 3,
        soft_conn_limit: 2,
        hard_conn_limit: 4,
    };
    let mut rng = StdRng::seed_from_u64(1);

    let mut swarm = swarm::build_peers(&params, &mut rng);
    assert!(swarm.peers[0].is_done());

    let rounds = swarm.run(&mut rng);
    assert_eq!(rounds, 1);
    assert!(swarm.all_complete);
}
