//! Shared utilities: parameter feasibility checks.

pub mod validation;

pub use validation::{check_swarm_feasibility, check_topology_feasibility};
