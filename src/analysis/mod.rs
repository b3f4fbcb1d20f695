//! Post-run analysis and report generation.
//!
//! This module turns finished simulation state into structured reports:
//! degree distributions and per-vertex counters for topology builds,
//! completion statistics and per-peer summaries for swarm runs.

pub mod report;
pub mod types;

pub use report::{
    build_swarm_report, build_topology_report, generate_json_report, generate_text_report,
    render_swarm_text, render_topology_text,
};
pub use types::*;
