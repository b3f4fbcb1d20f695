//! Report building and rendering for simulation runs.
//!
//! Aggregation here is read-only over the final state and runs on rayon;
//! the simulations themselves stay sequential so seeded runs replay
//! exactly.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::swarm::Swarm;
use crate::topology::Graph;

use super::types::{
    CompletionStats, DegreeStats, PeerSummary, ReportMetadata, SwarmReport, TopologyReport,
    VertexSummary,
};

/// Build the topology report from a finished graph.
pub fn build_topology_report(graph: &Graph, target_degree: usize, seed: u64) -> TopologyReport {
    let degrees: Vec<usize> = graph.vertices.par_iter().map(|v| v.degree()).collect();
    let total_connects: u64 = graph.vertices.par_iter().map(|v| v.connects).sum();
    let total_disconnects: u64 = graph.vertices.par_iter().map(|v| v.disconnects).sum();

    let mut degree_histogram = std::collections::BTreeMap::new();
    for &degree in &degrees {
        *degree_histogram.entry(degree).or_insert(0) += 1;
    }

    let min = degrees.iter().copied().min().unwrap_or(0);
    let max = degrees.iter().copied().max().unwrap_or(0);
    let mean = if degrees.is_empty() {
        0.0
    } else {
        degrees.iter().sum::<usize>() as f64 / degrees.len() as f64
    };

    let vertices: Vec<VertexSummary> = graph
        .vertices
        .iter()
        .map(|v| VertexSummary {
            id: v.id,
            degree: v.degree(),
            connects: v.connects,
            disconnects: v.disconnects,
        })
        .collect();

    TopologyReport {
        metadata: ReportMetadata::new(seed),
        vertex_count: graph.vertices.len(),
        target_degree,
        total_connects,
        total_disconnects,
        degree_histogram,
        degree_stats: DegreeStats { min, max, mean },
        under_degree: degrees.iter().filter(|&&d| d < target_degree).count(),
        vertices,
    }
}

/// Build the swarm report from a finished run.
pub fn build_swarm_report(swarm: &Swarm, seed: u64) -> SwarmReport {
    let completed_peers = swarm.peers.par_iter().filter(|p| p.is_done()).count();
    let total_failed_attempts: u64 = swarm
        .peers
        .par_iter()
        .map(|p| p.failed_connection_attempts)
        .sum();

    let incomplete_peers: Vec<usize> = swarm
        .peers
        .iter()
        .filter(|p| !p.is_done())
        .map(|p| p.id)
        .collect();

    let mut finish_rounds: Vec<u64> = swarm
        .peers
        .par_iter()
        .filter_map(|p| p.finished_round)
        .collect();
    finish_rounds.par_sort_unstable();

    let completion = if finish_rounds.is_empty() {
        None
    } else {
        Some(CompletionStats {
            p50: percentile(&finish_rounds, 50),
            p90: percentile(&finish_rounds, 90),
            p100: percentile(&finish_rounds, 100),
        })
    };

    let peers: Vec<PeerSummary> = swarm
        .peers
        .iter()
        .map(|p| PeerSummary {
            id: p.id,
            neighbors: p.neighbors.iter().copied().collect(),
            failed_connection_attempts: p.failed_connection_attempts,
            finished_round: p.finished_round,
            completed: p.completed,
        })
        .collect();

    SwarmReport {
        metadata: ReportMetadata::new(seed),
        peer_count: swarm.peers.len(),
        piece_count: swarm.piece_count,
        total_rounds: swarm.rounds,
        all_complete: swarm.all_complete,
        completed_peers,
        incomplete_peers,
        total_failed_attempts,
        completion,
        peers,
    }
}

/// Nearest-rank percentile over a sorted slice.
fn percentile(sorted: &[u64], pct: usize) -> u64 {
    let index = (sorted.len() - 1) * pct / 100;
    sorted[index]
}

/// Render the topology report as human-readable text.
pub fn render_topology_text(report: &TopologyReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(72));
    lines.push("                       SWARMSIM TOPOLOGY REPORT".to_string());
    lines.push("=".repeat(72));
    lines.push(String::new());

    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Seed: {}", report.metadata.seed));
    lines.push(format!("Vertices: {}", report.vertex_count));
    lines.push(format!("Target degree: {}", report.target_degree));
    lines.push(String::new());

    lines.push(format!(
        "Final degrees: min {} / mean {:.2} / max {}",
        report.degree_stats.min, report.degree_stats.mean, report.degree_stats.max
    ));
    lines.push(format!(
        "Under-degree vertices: {}",
        report.under_degree
    ));
    lines.push(format!(
        "Counter totals: {} connects, {} disconnects",
        report.total_connects, report.total_disconnects
    ));
    lines.push(String::new());

    lines.push("Degree histogram:".to_string());
    for (degree, count) in &report.degree_histogram {
        lines.push(format!("  degree {:3}: {} vertices", degree, count));
    }
    lines.push(String::new());

    lines.push("Per-vertex counters (id degree connects disconnects):".to_string());
    for vertex in &report.vertices {
        lines.push(format!(
            "  {} {} {} {}",
            vertex.id, vertex.degree, vertex.connects, vertex.disconnects
        ));
    }

    lines.join("\n")
}

/// Render the swarm report as human-readable text.
pub fn render_swarm_text(report: &SwarmReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(72));
    lines.push("                         SWARMSIM SWARM REPORT".to_string());
    lines.push("=".repeat(72));
    lines.push(String::new());

    lines.push(format!("Generated: {}", report.metadata.generated_at));
    lines.push(format!("Seed: {}", report.metadata.seed));
    lines.push(format!("Peers: {}", report.peer_count));
    lines.push(format!("Pieces: {}", report.piece_count));
    lines.push(String::new());

    lines.push(format!("Total rounds: {}", report.total_rounds));
    lines.push(format!(
        "Completed peers: {} of {}",
        report.completed_peers, report.peer_count
    ));
    if !report.all_complete {
        lines.push(format!(
            "Incomplete peers at the round ceiling: {:?}",
            report.incomplete_peers
        ));
    }
    lines.push(format!(
        "Failed connection attempts: {}",
        report.total_failed_attempts
    ));
    if let Some(completion) = &report.completion {
        lines.push(format!(
            "Finish rounds: p50 {} / p90 {} / p100 {}",
            completion.p50, completion.p90, completion.p100
        ));
    }
    lines.push(String::new());

    lines.push("Per-peer summary (id, failed attempts, finish round, neighbors):".to_string());
    for peer in &report.peers {
        let finish = peer
            .finished_round
            .map_or("-".to_string(), |r| r.to_string());
        lines.push(format!(
            "  peer {}: failed {}, finished {}, connected to {:?}",
            peer.id, peer.failed_connection_attempts, finish, peer.neighbors
        ));
    }

    lines.join("\n")
}

/// Write a report as pretty-printed JSON.
pub fn generate_json_report<T: Serialize>(report: &T, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Write rendered report text to a file.
pub fn generate_text_report(text: &str, output_path: &Path) -> Result<()> {
    fs::write(output_path, text)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}
