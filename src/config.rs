//! Simulation parameter structures and scenario-file loading.
//!
//! Parameters arrive either directly from CLI flags or from a YAML scenario
//! file; both funnel through `validate()` before a run starts. Defaults
//! match the historical simulation defaults (50 vertices at degree 10,
//! 5000 peers sharing 125 pieces).

use std::fs::File;
use std::path::Path;

use color_eyre::Result;
use log::info;
use serde::{Deserialize, Serialize};

/// Errors produced by parameter validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid topology parameters: {0}")]
    InvalidTopology(String),

    #[error("invalid swarm parameters: {0}")]
    InvalidSwarm(String),

    #[error("scenario defines neither a topology nor a swarm section")]
    EmptyScenario,
}

/// Parameters for the topology builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopologyParams {
    /// Number of vertices to insert.
    #[serde(default = "default_vertex_count")]
    pub vertex_count: usize,

    /// Target neighbor count per vertex.
    #[serde(default = "default_degree")]
    pub degree: usize,
}

fn default_vertex_count() -> usize {
    50
}

fn default_degree() -> usize {
    10
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            vertex_count: default_vertex_count(),
            degree: default_degree(),
        }
    }
}

impl TopologyParams {
    /// Validate the topology parameters.
    ///
    /// An infeasible degree (degree >= vertex count) is not an error:
    /// under-degree vertices are an accepted build outcome. Zero counts are
    /// rejected because the build would be meaningless.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.vertex_count == 0 {
            return Err(ValidationError::InvalidTopology(
                "vertex count must be positive".to_string(),
            ));
        }
        if self.degree == 0 {
            return Err(ValidationError::InvalidTopology(
                "degree must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for the swarm simulator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SwarmParams {
    /// Total number of peers.
    #[serde(default = "default_peer_count")]
    pub peer_count: usize,

    /// Total number of content pieces.
    #[serde(default = "default_piece_count")]
    pub piece_count: usize,

    /// Pieces a peer may upload or download within one round.
    #[serde(default = "default_transmit_limit")]
    pub transmit_limit: usize,

    /// Number of neighbors a joining peer seeks.
    #[serde(default = "default_soft_conn_limit")]
    pub soft_conn_limit: usize,

    /// Absolute connection ceiling a peer refuses to exceed.
    #[serde(default = "default_hard_conn_limit")]
    pub hard_conn_limit: usize,
}

fn default_peer_count() -> usize {
    5000
}

fn default_piece_count() -> usize {
    125
}

fn default_transmit_limit() -> usize {
    10
}

fn default_soft_conn_limit() -> usize {
    5
}

fn default_hard_conn_limit() -> usize {
    20
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            peer_count: default_peer_count(),
            piece_count: default_piece_count(),
            transmit_limit: default_transmit_limit(),
            soft_conn_limit: default_soft_conn_limit(),
            hard_conn_limit: default_hard_conn_limit(),
        }
    }
}

impl SwarmParams {
    /// Validate the swarm parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.peer_count == 0 {
            return Err(ValidationError::InvalidSwarm(
                "peer count must be positive".to_string(),
            ));
        }
        if self.piece_count == 0 {
            return Err(ValidationError::InvalidSwarm(
                "piece count must be positive".to_string(),
            ));
        }
        if self.transmit_limit == 0 {
            return Err(ValidationError::InvalidSwarm(
                "transmit limit must be positive".to_string(),
            ));
        }
        if self.soft_conn_limit == 0 || self.hard_conn_limit == 0 {
            return Err(ValidationError::InvalidSwarm(
                "connection limits must be positive".to_string(),
            ));
        }
        if self.soft_conn_limit > self.hard_conn_limit {
            return Err(ValidationError::InvalidSwarm(format!(
                "soft connection limit {} exceeds hard connection limit {}",
                self.soft_conn_limit, self.hard_conn_limit
            )));
        }
        Ok(())
    }
}

/// Top-level scenario file: an optional seed plus one or both simulations.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// RNG seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Topology builder section.
    #[serde(default)]
    pub topology: Option<TopologyParams>,

    /// Swarm simulator section.
    #[serde(default)]
    pub swarm: Option<SwarmParams>,
}

impl Scenario {
    /// Validate the scenario as a whole.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topology.is_none() && self.swarm.is_none() {
            return Err(ValidationError::EmptyScenario);
        }
        if let Some(topology) = &self.topology {
            topology.validate()?;
        }
        if let Some(swarm) = &self.swarm {
            swarm.validate()?;
        }
        Ok(())
    }
}

/// Load and parse a scenario from a YAML file.
pub fn load_scenario(path: &Path) -> Result<Scenario> {
    info!("Loading scenario from: {:?}", path);

    let file = File::open(path)?;
    let scenario: Scenario = serde_yaml::from_reader(file)?;

    scenario.validate()?;

    Ok(scenario)
}
