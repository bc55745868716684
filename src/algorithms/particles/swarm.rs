use crate::{
    core::{
        utils::{random_matrix_in_limits, SampleFloat},
        Bound, Bounds, Options, ValidatedConfig,
    },
    DMatrix, DVector, Float,
};
use fastrand::Rng;
use serde::{Deserialize, Serialize};

/// The state of a swarm of particles used in local-best particle swarm optimization.
///
/// Every matrix has one row per particle and one column per dimension. After each call to
/// [`Swarm::update_personal_bests`], `pbest_cost[i]` is the lowest cost ever observed for
/// particle `i` and `pbest_pos` row `i` is the position where it was observed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    /// The current positions of the particles.
    pub position: DMatrix<Float>,
    /// The current velocities of the particles.
    pub velocity: DMatrix<Float>,
    /// The costs of the particles at their last evaluated positions.
    pub current_cost: DVector<Float>,
    /// The best position found by each particle.
    pub pbest_pos: DMatrix<Float>,
    /// The cost at the best position found by each particle.
    pub pbest_cost: DVector<Float>,
    /// The lowest personal-best cost found by the whole swarm.
    pub best_cost: Float,
    /// The position of [`Swarm::best_cost`], `None` until the swarm has been evaluated.
    pub best_pos: Option<DVector<Float>>,
}

impl Default for Swarm {
    fn default() -> Self {
        Self {
            position: DMatrix::zeros(0, 0),
            velocity: DMatrix::zeros(0, 0),
            current_cost: DVector::zeros(0),
            pbest_pos: DMatrix::zeros(0, 0),
            pbest_cost: DVector::zeros(0),
            best_cost: Float::INFINITY,
            best_pos: None,
        }
    }
}

impl Swarm {
    /// Create the particles of a swarm from a validated configuration.
    ///
    /// Positions are copied from the initial positions if given, and otherwise drawn uniformly
    /// inside of the bounds (or `[-1, 1)` without bounds). Velocities are drawn uniformly inside
    /// of the velocity clamp, or otherwise inside of a tenth of the position range on either
    /// side of zero. Positions are drawn before velocities, each row by row.
    pub fn initialize(config: &ValidatedConfig, rng: &mut Rng) -> Self {
        let n_particles = config.n_particles;
        let position = config.init_pos.clone().unwrap_or_else(|| {
            random_matrix_in_limits(n_particles, &config.position_limits(), rng)
        });
        let velocity = random_matrix_in_limits(n_particles, &config.velocity_limits(), rng);
        Self {
            pbest_pos: position.clone(),
            position,
            velocity,
            current_cost: DVector::zeros(n_particles),
            pbest_cost: DVector::from_element(n_particles, Float::INFINITY),
            best_cost: Float::INFINITY,
            best_pos: None,
        }
    }
    /// The number of dimensions of the search space.
    pub fn dimensions(&self) -> usize {
        self.position.ncols()
    }
    /// Stores the costs at the current positions and moves every personal best whose cost is
    /// strictly improved. Returns the number of improved particles.
    ///
    /// `costs` must have one entry per particle.
    pub fn update_personal_bests(&mut self, costs: &DVector<Float>) -> usize {
        self.current_cost.copy_from(costs);
        let mut n_improved = 0;
        for (i, &cost) in costs.iter().enumerate() {
            if cost < self.pbest_cost[i] {
                self.pbest_cost[i] = cost;
                self.pbest_pos.row_mut(i).copy_from(&self.position.row(i));
                n_improved += 1;
            }
        }
        n_improved
    }
    /// Moves the swarm-wide best to the lowest personal best (the first one on ties) if it is
    /// strictly lower than the current best. Returns `true` if the best changed.
    pub fn update_global_best(&mut self) -> bool {
        let Some((index, &cost)) = self
            .pbest_cost
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
        else {
            return false;
        };
        if cost < self.best_cost {
            self.best_cost = cost;
            self.best_pos = Some(self.pbest_pos.row(index).transpose());
            return true;
        }
        false
    }
    /// Applies the local-best velocity rule
    ///
    /// ```math
    /// v_{i,d} \leftarrow w v_{i,d} + c_1 r_1 (p_{i,d} - x_{i,d}) + c_2 r_2 (l_{i,d} - x_{i,d})
    /// ```
    /// with $`r_1, r_2 \sim U[0, 1)`$ drawn for every particle and dimension, then clips each
    /// component into the velocity clamp if one is given.
    #[allow(clippy::suboptimal_flops)]
    pub fn update_velocity(
        &mut self,
        options: &Options,
        local_best_pos: &DMatrix<Float>,
        velocity_clamp: Option<&Bound>,
        rng: &mut Rng,
    ) {
        let (n_particles, dimensions) = self.position.shape();
        for i in 0..n_particles {
            for d in 0..dimensions {
                let r1 = rng.float();
                let r2 = rng.float();
                let x = self.position[(i, d)];
                let v = options.w * self.velocity[(i, d)]
                    + options.c1 * r1 * (self.pbest_pos[(i, d)] - x)
                    + options.c2 * r2 * (local_best_pos[(i, d)] - x);
                self.velocity[(i, d)] = velocity_clamp.map_or(v, |clamp| clamp.clip(v));
            }
        }
    }
    /// Moves every particle along its velocity and clips the result into the bounds, if any.
    pub fn update_position(&mut self, bounds: Option<&Bounds>) {
        self.position += &self.velocity;
        if let Some(bounds) = bounds {
            bounds.clip_columns(&mut self.position);
            debug_assert!(bounds.contains_rows(&self.position));
        }
    }
    /// The mean of the personal-best costs.
    pub fn mean_pbest_cost(&self) -> Float {
        self.pbest_cost.mean()
    }
}
