//! Feasibility checks for simulation parameters.
//!
//! Hard validation lives on the config types; these helpers flag parameter
//! combinations that run fine but cannot reach full connectivity, so the
//! outcome does not surprise anyone reading the report.

use log::warn;

use crate::config::{SwarmParams, TopologyParams};

/// Warn when the target degree cannot be met even by a complete graph.
pub fn check_topology_feasibility(params: &TopologyParams) {
    if params.degree >= params.vertex_count {
        warn!(
            "target degree {} is not reachable with {} vertices; vertices will stay under-degree",
            params.degree, params.vertex_count
        );
    }
}

/// Warn about swarm parameter combinations that leave peers short.
pub fn check_swarm_feasibility(params: &SwarmParams) {
    if params.soft_conn_limit >= params.peer_count {
        warn!(
            "soft connection limit {} is not reachable with {} peers",
            params.soft_conn_limit, params.peer_count
        );
    }
    if params.peer_count > 1 && params.hard_conn_limit == 1 {
        warn!("hard connection limit 1 will leave most peers isolated");
    }
}
