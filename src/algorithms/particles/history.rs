use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{algorithms::particles::SwarmStatus, traits::Observer, DMatrix, Float};

/// An [`Observer`] which records the per-iteration traces of a swarm.
///
/// Every executed iteration appends exactly one entry to each trace, so all traces always have the
/// same length. Position and velocity snapshots are independent copies of the swarm matrices.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// The best cost found by the swarm after each iteration
    pub cost: Vec<Float>,
    /// The mean personal-best cost after each iteration
    pub mean_pbest: Vec<Float>,
    /// The mean neighborhood-best cost after each iteration
    pub mean_neighbor: Vec<Float>,
    /// The particle positions after each iteration
    pub position: Vec<DMatrix<Float>>,
    /// The particle velocities after each iteration
    pub velocity: Vec<DMatrix<Float>>,
}

impl History {
    /// The number of recorded iterations.
    pub fn len(&self) -> usize {
        self.cost.len()
    }
    /// Returns `true` if no iteration has been recorded.
    pub fn is_empty(&self) -> bool {
        self.cost.is_empty()
    }
    /// Removes every recorded iteration.
    pub fn clear(&mut self) {
        self.cost.clear();
        self.mean_pbest.clear();
        self.mean_neighbor.clear();
        self.position.clear();
        self.velocity.clear();
    }
    /// Writes the history as a Python pickle, which can be loaded to plot the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the history could not be serialized or written.
    pub fn to_pickle<W: Write>(&self, writer: &mut W) -> Result<(), serde_pickle::Error> {
        serde_pickle::to_writer(writer, self, Default::default())
    }
}

impl Observer<SwarmStatus> for History {
    fn observe(&mut self, _current_step: usize, status: &SwarmStatus) {
        let swarm = &status.swarm;
        self.cost.push(swarm.best_cost);
        self.mean_pbest.push(swarm.mean_pbest_cost());
        self.mean_neighbor.push(status.local_bests.mean_cost());
        self.position.push(swarm.position.clone());
        self.velocity.push(swarm.velocity.clone());
    }
}
