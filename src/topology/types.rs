//! Core graph types for incremental topology construction.
//!
//! Vertices live in arrival order inside `Graph`; adjacency is stored as
//! sets of vertex ids, with the vector acting as the id-to-record lookup.
//! Edges are kept symmetric by routing every structural change through
//! `Graph::connect` and `Graph::disconnect`.

use std::collections::BTreeSet;

/// Errors that indicate the graph violated its own structural invariants.
///
/// Ordinary negative outcomes (a saturated endpoint, an already-present
/// edge) are reported as `false` returns, never through this type.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("edge {a} <-> {b} missing during rewiring")]
    MissingEdge { a: usize, b: usize },

    #[error("could not restore edge {a} <-> {b} after a failed rewiring")]
    EdgeRestoreFailed { a: usize, b: usize },
}

/// A single vertex with a fixed target degree.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: usize,
    pub target_degree: usize,
    pub neighbors: BTreeSet<usize>,
    /// Successful connect events this vertex took part in.
    pub connects: u64,
    /// Successful disconnect events this vertex took part in.
    pub disconnects: u64,
}

impl Vertex {
    pub fn new(id: usize, target_degree: usize) -> Self {
        Self {
            id,
            target_degree,
            neighbors: BTreeSet::new(),
            connects: 0,
            disconnects: 0,
        }
    }

    /// Current neighbor count.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether this vertex already holds its target degree of neighbors.
    pub fn is_full(&self) -> bool {
        self.neighbors.len() >= self.target_degree
    }
}

/// Undirected graph over vertices, insertion order = arrival order.
#[derive(Debug, Default)]
pub struct Graph {
    pub vertices: Vec<Vertex>,
}

impl Graph {
    /// Attempt to create the symmetric edge `a <-> b`.
    ///
    /// Returns `false` when the endpoints coincide, either endpoint is at
    /// capacity, or the edge already exists. Both connect counters are
    /// incremented on success.
    pub fn connect(&mut self, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        if self.vertices[a].is_full() || self.vertices[b].is_full() {
            return false;
        }
        if self.vertices[a].neighbors.contains(&b) {
            return false;
        }

        self.vertices[a].neighbors.insert(b);
        self.vertices[b].neighbors.insert(a);
        self.vertices[a].connects += 1;
        self.vertices[b].connects += 1;
        true
    }

    /// Remove the symmetric edge `a <-> b`.
    ///
    /// Returns `false` when the edge does not exist. Both disconnect
    /// counters are incremented on success.
    pub fn disconnect(&mut self, a: usize, b: usize) -> bool {
        if !self.vertices[a].neighbors.remove(&b) {
            return false;
        }
        self.vertices[b].neighbors.remove(&a);
        self.vertices[a].disconnects += 1;
        self.vertices[b].disconnects += 1;
        true
    }
}
