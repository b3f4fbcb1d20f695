//! Report data types for simulation output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata attached to every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    /// RNG seed the run used; replaying with the same seed reproduces it.
    pub seed: u64,
}

impl ReportMetadata {
    pub fn new(seed: u64) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            seed,
        }
    }
}

/// Statistical summary of final vertex degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: usize,
    pub max: usize,
    pub mean: f64,
}

/// Per-vertex counters, reported in vertex order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexSummary {
    pub id: usize,
    pub degree: usize,
    pub connects: u64,
    pub disconnects: u64,
}

/// Full topology-builder report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyReport {
    pub metadata: ReportMetadata,
    pub vertex_count: usize,
    pub target_degree: usize,
    /// Sum of per-vertex connect counters (each edge event counts twice).
    pub total_connects: u64,
    /// Sum of per-vertex disconnect counters.
    pub total_disconnects: u64,
    /// Final degree -> number of vertices holding it.
    pub degree_histogram: BTreeMap<usize, usize>,
    pub degree_stats: DegreeStats,
    /// Vertices that ended below their target degree.
    pub under_degree: usize,
    pub vertices: Vec<VertexSummary>,
}

/// Milestone-round percentiles across peers that reached the milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionStats {
    pub p50: u64,
    pub p90: u64,
    pub p100: u64,
}

/// Per-peer summary after a swarm run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerSummary {
    pub id: usize,
    pub neighbors: Vec<usize>,
    pub failed_connection_attempts: u64,
    /// Round at which the peer reached one piece short of full possession.
    pub finished_round: Option<u64>,
    pub completed: usize,
}

/// Full swarm-simulator report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmReport {
    pub metadata: ReportMetadata,
    pub peer_count: usize,
    pub piece_count: usize,
    pub total_rounds: u64,
    pub all_complete: bool,
    pub completed_peers: usize,
    pub incomplete_peers: Vec<usize>,
    pub total_failed_attempts: u64,
    pub completion: Option<CompletionStats>,
    pub peers: Vec<PeerSummary>,
}
