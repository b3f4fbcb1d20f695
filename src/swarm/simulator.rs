//! Round-based piece propagation over the connection graph.
//!
//! Each round, every incomplete peer receives `transmit_limit` fetch
//! opportunities; the opportunities are shuffled into one work list so
//! contention for upload slots stays approximately fair without a separate
//! scheduler. The run stops when every peer holds every piece or the round
//! ceiling is reached.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::types::Swarm;

/// Hard ceiling on simulated rounds; reaching it is a documented early
/// exit, not an error.
pub const MAX_ROUNDS: u64 = 1000;

impl Swarm {
    /// Drive rounds until every peer holds every piece or the round
    /// ceiling is reached. Returns total elapsed rounds.
    pub fn run(&mut self, rng: &mut StdRng) -> u64 {
        let mut round: u64 = 0;

        loop {
            round += 1;
            debug!("round {}", round);

            let mut plan: Vec<usize> = Vec::new();
            for peer in &self.peers {
                if !peer.is_done() {
                    for _ in 0..self.transmit_limit {
                        plan.push(peer.id);
                    }
                }
            }
            plan.shuffle(rng);

            for id in plan {
                self.fetch_step(id, round, rng);
            }

            for peer in &mut self.peers {
                peer.uploaded_this_round = 0;
                peer.downloaded_this_round = 0;
            }

            if self.peers.iter().all(|p| p.is_done()) {
                self.all_complete = true;
                break;
            }
            if round >= MAX_ROUNDS {
                let incomplete = self.peers.iter().filter(|p| !p.is_done()).count();
                warn!(
                    "round ceiling {} reached with {} peers incomplete",
                    MAX_ROUNDS, incomplete
                );
                break;
            }
        }

        self.rounds = round;
        info!("done, total rounds = {}", round);
        round
    }

    /// One fetch attempt for peer `id`.
    ///
    /// Collects every (neighbor, piece) pair where the neighbor still has
    /// upload budget and holds a piece the fetcher lacks, then applies one
    /// uniformly random pair. An empty candidate set is a no-op.
    fn fetch_step(&mut self, id: usize, round: u64, rng: &mut StdRng) {
        if self.peers[id].is_done() {
            return;
        }
        if self.peers[id].downloaded_this_round >= self.transmit_limit {
            return;
        }

        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for &neighbor in &self.peers[id].neighbors {
            if self.peers[neighbor].uploaded_this_round >= self.transmit_limit {
                continue;
            }
            for piece in 0..self.piece_count {
                if self.peers[neighbor].pieces[piece] && !self.peers[id].pieces[piece] {
                    candidates.push((neighbor, piece));
                }
            }
        }

        let (source, piece) = match candidates.choose(rng) {
            Some(&pair) => pair,
            None => return,
        };

        self.peers[id].pieces[piece] = true;
        self.peers[id].completed += 1;
        self.peers[id].downloaded_this_round += 1;
        self.peers[source].uploaded_this_round += 1;

        if self.peers[id].completed + 1 == self.piece_count {
            self.peers[id].finished_round = Some(round);
            info!("peer {} finished downloading at round {}", id, round);
        }
    }
}
