//! Construction of the soft/hard-bounded random connection graph.
//!
//! Peers join in arrival order. Each joiner walks a uniformly random
//! permutation of the existing peers and connects until it holds the soft
//! limit of neighbors; candidates already at the hard limit are skipped and
//! counted against the joiner. The first arrival becomes the seed and
//! starts with the complete piece set.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::SwarmParams;

use super::types::{Peer, Swarm};

/// A joiner abandons its candidate search once its failed-attempt counter
/// passes this ceiling, accepting whatever connectivity it reached.
const MAX_FAILED_ATTEMPTS: u64 = 50;

/// Create `peer_count` peers in arrival order and wire the connection
/// graph. Peer 0 is the seed with full possession at round zero.
pub fn build_peers(params: &SwarmParams, rng: &mut StdRng) -> Swarm {
    let mut swarm = Swarm {
        peers: Vec::with_capacity(params.peer_count),
        piece_count: params.piece_count,
        transmit_limit: params.transmit_limit,
        rounds: 0,
        all_complete: false,
    };

    for id in 0..params.peer_count {
        let mut peer = Peer::new(id, params.piece_count);

        let mut candidates: Vec<usize> = (0..id).collect();
        candidates.shuffle(rng);

        for candidate in candidates {
            if swarm.peers[candidate].neighbors.len() < params.hard_conn_limit {
                peer.neighbors.insert(candidate);
                swarm.peers[candidate].neighbors.insert(id);
                if peer.neighbors.len() >= params.soft_conn_limit {
                    break;
                }
            } else {
                peer.failed_connection_attempts += 1;
                if peer.failed_connection_attempts > MAX_FAILED_ATTEMPTS {
                    break;
                }
            }
        }

        swarm.peers.push(peer);
    }

    // The first arrival seeds the swarm.
    if let Some(seed) = swarm.peers.first_mut() {
        for piece in seed.pieces.iter_mut() {
            *piece = true;
        }
        seed.completed = seed.pieces.len();
    }

    for peer in &swarm.peers {
        debug!(
            "peer {} failed {} connection attempts, connected to {:?}",
            peer.id, peer.failed_connection_attempts, peer.neighbors
        );
    }

    swarm
}
