use crate::{
    algorithms::particles::{LocalBests, Swarm},
    traits::Status,
    DVector, Float,
};
use serde::{Deserialize, Serialize};

/// A status for local-best particle swarm optimization.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct SwarmStatus {
    /// The swarm
    pub swarm: Swarm,
    /// The neighborhood bests computed during the last iteration
    pub local_bests: LocalBests,
    /// An indicator of whether the swarm has converged
    pub converged: bool,
    /// A message containing information about the condition of the swarm or convergence
    pub message: String,
    /// The number of objective evaluations in the current run (one per particle per iteration)
    pub n_f_evals: usize,
    /// The number of iterations executed in the current run
    pub n_iters: usize,
}

impl SwarmStatus {
    /// Get the lowest cost found by the swarm.
    pub const fn best_cost(&self) -> Float {
        self.swarm.best_cost
    }
    /// Get the position of the lowest cost found by the swarm, if any.
    pub const fn best_pos(&self) -> Option<&DVector<Float>> {
        self.swarm.best_pos.as_ref()
    }
}

impl Status for SwarmStatus {
    fn reset(&mut self) {
        self.converged = false;
        self.message = String::new();
        self.n_f_evals = 0;
        self.n_iters = 0;
    }
    fn converged(&self) -> bool {
        self.converged
    }
    fn message(&self) -> &str {
        &self.message
    }
    fn update_message(&mut self, message: &str) {
        self.message = message.to_string();
    }
}
