//! Incremental topology construction.
//!
//! This module builds randomized, degree-bounded connection graphs by
//! inserting vertices one at a time and rewiring saturated candidates so
//! late arrivals can still reach their target degree.

pub mod builder;
pub mod types;

// Re-export key types and functions for easier access
pub use builder::build;
pub use types::{Graph, TopologyError, Vertex};
