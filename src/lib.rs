//! # Swarmsim - Discrete-event simulator for peer-to-peer overlay networks
//!
//! This library models the formation and behavior of peer-to-peer overlay
//! networks through discrete-event simulation, without deploying any real
//! infrastructure.
//!
//! ## Overview
//!
//! Two independent subsystems cover the two phases of overlay life:
//!
//! - **Topology builder**: incrementally grows a randomized,
//!   degree-bounded connection graph. Each arriving vertex targets a fixed
//!   degree; when its candidates are saturated it can steal a slot through
//!   rewiring, and the displaced vertex is given a chance to recover its
//!   degree, so late arrivals do not end up permanently under-connected.
//! - **Swarm simulator**: wires a fixed peer set into a soft/hard-bounded
//!   random connection graph, seeds the first peer with the complete piece
//!   set, and runs discrete rounds of piece exchange under a per-round
//!   transmit budget until every peer completes or the round ceiling is
//!   reached.
//!
//! Both subsystems draw every random decision (candidate order, displaced
//! neighbor, work-list shuffle, piece choice) from one seedable `StdRng`,
//! so a run is fully reproducible from its seed.
//!
//! ## Architecture
//!
//! - `config`: parameter structures, YAML scenario parsing, validation
//! - `topology`: incremental graph construction with rewiring
//! - `swarm`: connection-graph building and round-based propagation
//! - `analysis`: report building (JSON and text) over finished runs
//! - `utils`: parameter feasibility checks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use swarmsim::config::TopologyParams;
//! use swarmsim::topology;
//!
//! let params = TopologyParams { vertex_count: 50, degree: 10 };
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let graph = topology::build(&params, &mut rng)?;
//! for vertex in &graph.vertices {
//!     println!("vertex {}: {} disconnects", vertex.id, vertex.disconnects);
//! }
//! # Ok::<(), swarmsim::topology::TopologyError>(())
//! ```
//!
//! ## Error Handling
//!
//! Expected negative outcomes (a saturated candidate, a fetch attempt with
//! nothing to fetch) are ordinary boolean/empty results. Structural
//! invariant violations during rewiring are `TopologyError`s that abort
//! the build; the binary reports them through `color_eyre`.

pub mod analysis;
pub mod config;
pub mod swarm;
pub mod topology;
pub mod utils;
