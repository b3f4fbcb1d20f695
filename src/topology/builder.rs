//! Incremental random regular-graph construction with rewiring.
//!
//! Vertices arrive one at a time and try to reach their target degree by
//! connecting to a uniformly random permutation of the existing vertices.
//! When a candidate is saturated, the newcomer may steal one of its slots:
//! the candidate drops a random neighbor and takes the newcomer instead,
//! and the displaced neighbor is then offered to the newcomer as well so a
//! completed swap leaves no vertex short. A swap that cannot complete is
//! rolled back edge by edge.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::TopologyParams;

use super::types::{Graph, TopologyError, Vertex};

/// Build a graph of `vertex_count` vertices, each targeting `degree`
/// neighbors.
///
/// Under-degree vertices are accepted silently when no feasible completion
/// exists (early arrivals with small candidate pools). The only error
/// channel is an internal-consistency violation during rewiring.
pub fn build(params: &TopologyParams, rng: &mut StdRng) -> Result<Graph, TopologyError> {
    let mut graph = Graph::default();

    for id in 0..params.vertex_count {
        graph.vertices.push(Vertex::new(id, params.degree));
        add_edges(&mut graph, id, rng)?;
        debug!(
            "vertex {} placed with degree {}",
            id,
            graph.vertices[id].degree()
        );
    }

    Ok(graph)
}

/// Give vertex `id` its edges, visiting the prior vertices in a uniformly
/// random order and falling back to rewiring when a direct connect fails.
fn add_edges(graph: &mut Graph, id: usize, rng: &mut StdRng) -> Result<(), TopologyError> {
    let mut candidates: Vec<usize> = (0..id).collect();
    candidates.shuffle(rng);

    for candidate in candidates {
        if graph.vertices[id].is_full() {
            break;
        }
        if !graph.connect(id, candidate) {
            reconnect(graph, candidate, id, rng)?;
        }
    }

    Ok(())
}

/// Rewire one of `at`'s slots toward `incoming`.
///
/// `at` drops a uniformly random neighbor and connects to `incoming`; the
/// displaced neighbor then connects to `incoming` as well. If either
/// connect fails, the edges touched so far are undone so the graph returns
/// to an equivalent-degree state. A disconnect or restore that cannot
/// succeed means the symmetric-edge invariant was broken and aborts the
/// build.
fn reconnect(
    graph: &mut Graph,
    at: usize,
    incoming: usize,
    rng: &mut StdRng,
) -> Result<bool, TopologyError> {
    let neighbors: Vec<usize> = graph.vertices[at].neighbors.iter().copied().collect();
    let displaced = match neighbors.choose(rng) {
        Some(&neighbor) => neighbor,
        None => return Ok(false),
    };

    if !graph.disconnect(at, displaced) {
        return Err(TopologyError::MissingEdge { a: at, b: displaced });
    }

    if !graph.connect(at, incoming) {
        if !graph.connect(at, displaced) {
            return Err(TopologyError::EdgeRestoreFailed { a: at, b: displaced });
        }
        return Ok(false);
    }

    if !graph.connect(displaced, incoming) {
        if !graph.disconnect(at, incoming) {
            return Err(TopologyError::MissingEdge { a: at, b: incoming });
        }
        if !graph.connect(at, displaced) {
            return Err(TopologyError::EdgeRestoreFailed { a: at, b: displaced });
        }
        return Ok(false);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn assert_symmetric(graph: &Graph) {
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
    fn test_single_vertex_has_no_edges() {
        let params = TopologyParams {
            vertex_count: 1,
            degree: 5,
        };
        let mut rng = StdRng::seed_from_u64(1);

        let graph = build(&params, &mut rng).unwrap();
        assert_eq!(graph.vertices.len(), 1);
        assert!(graph.vertices[0].neighbors.is_empty());
        assert_eq!(graph.vertices[0].connects, 0);
        assert_eq!(graph.vertices[0].disconnects, 0);
    }

    #[test]
    fn test_four_vertices_degree_three_forms_complete_graph() {
        let params = TopologyParams {
            vertex_count: 4,
            degree: 3,
        };
        let mut rng = StdRng::seed_from_u64(7);

        let graph = build(&params, &mut rng).unwrap();
        for vertex in &graph.vertices {
            assert_eq!(vertex.degree(), 3, "vertex {} not saturated", vertex.id);
        }
        assert_symmetric(&graph);
    }

    #[test]
    fn test_capacity_and_symmetry_hold_on_larger_builds() {
        let params = TopologyParams {
            vertex_count: 60,
            degree: 8,
        };
        let mut rng = StdRng::seed_from_u64(99);

        let graph = build(&params, &mut rng).unwrap();
        assert_eq!(graph.vertices.len(), 60);
        for vertex in &graph.vertices {
            assert!(vertex.degree() <= vertex.target_degree);
        }
        assert_symmetric(&graph);
    }

    #[test]
    fn test_under_degree_accepted_when_infeasible() {
        let params = TopologyParams {
            vertex_count: 2,
            degree: 5,
        };
        let mut rng = StdRng::seed_from_u64(3);

        let graph = build(&params, &mut rng).unwrap();
        assert_eq!(graph.vertices[0].degree(), 1);
        assert_eq!(graph.vertices[1].degree(), 1);
    }

    #[test]
    fn test_same_seed_reproduces_the_graph() {
        let params = TopologyParams {
            vertex_count: 40,
            degree: 6,
        };

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        let graph_a = build(&params, &mut rng_a).unwrap();
        let graph_b = build(&params, &mut rng_b).unwrap();

        for (a, b) in graph_a.vertices.iter().zip(graph_b.vertices.iter()) {
            assert_eq!(a.neighbors, b.neighbors);
            assert_eq!(a.connects, b.connects);
            assert_eq!(a.disconnects, b.disconnects);
        }
    }

    #[test]
    fn test_failed_swap_restores_degrees() {
        // Vertex 0 is saturated toward 1 and 2; vertex 3 accepts nobody, so
        // the swap must fail at the first connect and roll back.
        let mut graph = Graph::default();
        graph.vertices.push(Vertex::new(0, 2));
        graph.vertices.push(Vertex::new(1, 2));
        graph.vertices.push(Vertex::new(2, 2));
        graph.vertices.push(Vertex::new(3, 0));
        assert!(graph.connect(0, 1));
        assert!(graph.connect(0, 2));

        let mut rng = StdRng::seed_from_u64(5);
        let swapped = reconnect(&mut graph, 0, 3, &mut rng).unwrap();

        assert!(!swapped);
        assert_eq!(graph.vertices[0].neighbors.len(), 2);
        assert!(graph.vertices[0].neighbors.contains(&1));
        assert!(graph.vertices[0].neighbors.contains(&2));
        assert!(graph.vertices[3].neighbors.is_empty());
    }

    #[test]
    fn test_swap_failing_at_displaced_peer_rolls_back_fully() {
        // Vertex 2 can take the edge from vertex 0, but the displaced
        // vertex 1 cannot follow because vertex 2 is then saturated; the
        // original 0 <-> 1 edge must come back.
        let mut graph = Graph::default();
        graph.vertices.push(Vertex::new(0, 1));
        graph.vertices.push(Vertex::new(1, 1));
        graph.vertices.push(Vertex::new(2, 1));
        assert!(graph.connect(0, 1));

        let mut rng = StdRng::seed_from_u64(11);
        let swapped = reconnect(&mut graph, 0, 2, &mut rng).unwrap();

        assert!(!swapped);
        assert!(graph.vertices[0].neighbors.contains(&1));
        assert!(graph.vertices[1].neighbors.contains(&0));
        assert!(graph.vertices[2].neighbors.is_empty());
    }

    #[test]
    fn test_reconnect_with_no_neighbors_is_a_noop() {
        let mut graph = Graph::default();
        graph.vertices.push(Vertex::new(0, 0));
        graph.vertices.push(Vertex::new(1, 1));

        let mut rng = StdRng::seed_from_u64(2);
        assert!(!reconnect(&mut graph, 0, 1, &mut rng).unwrap());
        assert!(graph.vertices[1].neighbors.is_empty());
    }
}
