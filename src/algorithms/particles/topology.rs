use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{algorithms::particles::Swarm, core::Norm, DMatrix, DVector, Float};

/// Finds the `k` nearest particles of every particle, including the particle itself.
///
/// Distances are measured between rows of `positions` with the given [`Norm`]. Each returned list
/// is sorted by distance, with the particle itself first and any other ties broken by the lower
/// particle index. Placing the particle ahead of other particles at distance zero keeps it in its
/// own neighborhood even when several particles share a position, so `k = 1` always gives `[i]`.
/// `k` is capped at the number of particles.
pub fn nearest_neighbors(positions: &DMatrix<Float>, k: usize, norm: Norm) -> Vec<Vec<usize>> {
    let n_particles = positions.nrows();
    let k = k.min(n_particles);
    (0..n_particles)
        .map(|i| {
            if k == 0 {
                return Vec::new();
            }
            let origin = positions.row(i);
            let mut candidates: Vec<(Float, usize)> = (0..n_particles)
                .map(|j| (norm.distance(&origin, &positions.row(j)), j))
                .collect();
            let order = |a: &(Float, usize), b: &(Float, usize)| -> Ordering {
                a.0.total_cmp(&b.0)
                    .then_with(|| (a.1 != i).cmp(&(b.1 != i)))
                    .then_with(|| a.1.cmp(&b.1))
            };
            if k < n_particles {
                candidates.select_nth_unstable_by(k - 1, order);
                candidates.truncate(k);
            }
            candidates.sort_unstable_by(order);
            candidates.into_iter().map(|(_, j)| j).collect()
        })
        .collect()
}

/// A nearest-neighbor ("local-best") swarm topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestNeighbors {
    /// The size of every neighborhood, including the particle itself.
    pub k: usize,
    /// The norm used to measure distances between particles.
    pub norm: Norm,
}

impl NearestNeighbors {
    /// The neighborhood of every particle at the given positions. See [`nearest_neighbors`].
    pub fn neighbors(&self, positions: &DMatrix<Float>) -> Vec<Vec<usize>> {
        nearest_neighbors(positions, self.k, self.norm)
    }
    /// Computes the neighborhoods at the current positions of the swarm and, for each particle,
    /// the neighbor with the lowest personal-best cost (the first one in neighbor order on ties).
    pub fn local_bests(&self, swarm: &Swarm) -> LocalBests {
        let neighbors = self.neighbors(&swarm.position);
        let index: Vec<usize> = neighbors
            .iter()
            .enumerate()
            .map(|(i, hood)| {
                hood.iter()
                    .copied()
                    .min_by(|&a, &b| swarm.pbest_cost[a].total_cmp(&swarm.pbest_cost[b]))
                    .unwrap_or(i)
            })
            .collect();
        let cost = DVector::from_iterator(index.len(), index.iter().map(|&j| swarm.pbest_cost[j]));
        let position = DMatrix::from_fn(index.len(), swarm.dimensions(), |i, d| {
            swarm.pbest_pos[(index[i], d)]
        });
        LocalBests {
            neighbors,
            index,
            cost,
            position,
        }
    }
}

/// The best personal bests within the neighborhood of every particle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalBests {
    /// The neighborhood of every particle, nearest first.
    pub neighbors: Vec<Vec<usize>>,
    /// The index of the best neighbor of every particle.
    pub index: Vec<usize>,
    /// The personal-best cost of the best neighbor of every particle.
    pub cost: DVector<Float>,
    /// The personal-best position of the best neighbor of every particle (one row per particle).
    pub position: DMatrix<Float>,
}

impl Default for LocalBests {
    fn default() -> Self {
        Self {
            neighbors: Vec::new(),
            index: Vec::new(),
            cost: DVector::zeros(0),
            position: DMatrix::zeros(0, 0),
        }
    }
}

impl LocalBests {
    /// The mean of the local-best costs.
    pub fn mean_cost(&self) -> Float {
        self.cost.mean()
    }
}
