use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::{
        FTolTerminator, History, LocalBests, NearestNeighbors, Swarm, SwarmStatus,
    },
    core::{
        utils::maybe_warn, validate, Arg, Callbacks, ConfigError, OptimizeError, OptionMap,
        SwarmSummary, ValidatedConfig,
    },
    traits::{CostFunction, Observer, Status, Terminator},
    DMatrix, DVector, Float,
};

/// The raw configuration of a [`LocalBestPSO`].
///
/// Nothing is checked until the configuration is handed to [`LocalBestPSO::new`], so a
/// configuration may be deserialized or built up freely.
///
/// ```rust
/// use lbpso::prelude::*;
///
/// let config = LocalBestConfig::new(
///     20,
///     3,
///     [("c1", 0.5), ("c2", 0.3), ("w", 0.9), ("k", 3.0), ("p", 1.0)],
/// )
/// .with_bounds((vec![-1.0, -2.0, -3.0], vec![1.0, 2.0, 3.0]))
/// .with_velocity_clamp((-0.5, 0.5))
/// .with_ftol(1e-6)
/// .with_ftol_iter(5);
/// assert_eq!(config.ftol_iter, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalBestConfig {
    /// The number of particles in the swarm (at least 2).
    pub n_particles: usize,
    /// The number of dimensions of the search space (at least 1).
    pub dimensions: usize,
    /// The options `c1`, `c2`, `w`, `k`, and `p`.
    pub options: OptionMap,
    /// The bounding box `(min_bound, max_bound)` of the search space.
    pub bounds: Option<Arg>,
    /// The range `(min_velocity, max_velocity)` of every velocity component.
    pub velocity_clamp: Option<Arg>,
    /// The initial positions of the particles.
    pub init_pos: Option<Arg>,
    /// The fractional tolerance used to stop early (default = `-inf`, never stops).
    pub ftol: Float,
    /// The number of consecutive stalled iterations needed to stop early (default = `1`).
    pub ftol_iter: usize,
    /// The number of iterations between progress reports when running verbosely
    /// (default = `1`).
    pub print_step: usize,
}

impl LocalBestConfig {
    /// Create a configuration for a swarm of `n_particles` in a `dimensions`-dimensional space.
    pub fn new<O: Into<OptionMap>>(n_particles: usize, dimensions: usize, options: O) -> Self {
        Self {
            n_particles,
            dimensions,
            options: options.into(),
            bounds: None,
            velocity_clamp: None,
            init_pos: None,
            ftol: Float::NEG_INFINITY,
            ftol_iter: 1,
            print_step: 1,
        }
    }
    /// Sets the bounds, a `(min_bound, max_bound)` tuple of per-dimension limits.
    pub fn with_bounds<A: Into<Arg>>(mut self, bounds: A) -> Self {
        self.bounds = Some(bounds.into());
        self
    }
    /// Sets the velocity clamp, a `(min_velocity, max_velocity)` tuple of scalars.
    pub fn with_velocity_clamp<A: Into<Arg>>(mut self, velocity_clamp: A) -> Self {
        self.velocity_clamp = Some(velocity_clamp.into());
        self
    }
    /// Sets the initial positions of the particles.
    ///
    /// These may be given as an `(n_particles, dimensions)` matrix, as a list of rows, or as every
    /// position flattened row by row. A single position, given as a `d`-vector, a list of `d`
    /// numbers or a `1 x d` matrix, is shared by every particle.
    pub fn with_init_pos<A: Into<Arg>>(mut self, init_pos: A) -> Self {
        self.init_pos = Some(init_pos.into());
        self
    }
    /// Sets the fractional tolerance used to stop early.
    pub const fn with_ftol(mut self, ftol: Float) -> Self {
        self.ftol = ftol;
        self
    }
    /// Sets the number of consecutive stalled iterations needed to stop early.
    pub const fn with_ftol_iter(mut self, ftol_iter: usize) -> Self {
        self.ftol_iter = ftol_iter;
        self
    }
    /// Sets the number of iterations between progress reports when running verbosely.
    pub const fn with_print_step(mut self, print_step: usize) -> Self {
        self.print_step = print_step;
        self
    }
}

/// Local-best Particle Swarm Optimizer
///
/// Every particle is attracted to its own best position and to the best personal best among its
/// `k` nearest neighbors (itself included), so that information spreads through the swarm
/// gradually rather than all particles chasing a single global best. Each iteration:
///
/// 1. the objective is evaluated on the whole position matrix,
/// 2. personal bests and the swarm-wide best are updated,
/// 3. the neighborhoods and their bests are computed from the current positions,
/// 4. velocities are updated as
///    ```math
///    v_{i}^{t+1} = w v_{i}^t + c_1 r_{1} (p_{i}^t - x_{i}^t) + c_2 r_{2} (l_{i}^t - x_{i}^t)
///    ```
///    and clipped into the velocity clamp,
/// 5. positions move by their velocities and are clipped into the bounds,
/// 6. the history is recorded and the stopping criteria are checked.
///
/// See [^1] for more information on neighborhood topologies.
///
/// [^1]: [Kennedy, J., & Mendes, R. (2002). Population structure and particle swarm performance. In Proceedings of the 2002 Congress on Evolutionary Computation (Vol. 2, pp. 1671–1676). IEEE.](https://doi.org/10.1109/CEC.2002.1004493)
#[derive(Clone)]
pub struct LocalBestPSO {
    config: ValidatedConfig,
    rng: Rng,
    topology: NearestNeighbors,
    status: SwarmStatus,
    history: History,
    ftol: FTolTerminator,
}

impl LocalBestPSO {
    /// Construct a new local-best optimizer and initialize its swarm.
    ///
    /// The configuration is fully validated before the random number generator is touched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any option, bound, velocity clamp, or initial position is
    /// missing, out of range, badly shaped, or of the wrong type.
    pub fn new(config: LocalBestConfig, rng: Rng) -> Result<Self, ConfigError> {
        let config = validate(&config)?;
        let topology = NearestNeighbors {
            k: config.options.k,
            norm: config.options.p,
        };
        let ftol = FTolTerminator::new(config.ftol, config.ftol_iter);
        let mut pso = Self {
            config,
            rng,
            topology,
            status: SwarmStatus::default(),
            history: History::default(),
            ftol,
        };
        pso.reset();
        Ok(pso)
    }
    /// Reinitialize the swarm and clear the history, reusing the validated configuration.
    ///
    /// Afterwards the best cost is `+inf` and there is no best position. Previously returned
    /// snapshots are unaffected.
    pub fn reset(&mut self) {
        self.status = SwarmStatus {
            swarm: Swarm::initialize(&self.config, &mut self.rng),
            ..Default::default()
        };
        self.history.clear();
        self.ftol.reset();
    }
    /// Run up to `iters` iterations on an objective without user data.
    ///
    /// Returns the best cost and its position. With `verbose`, progress is logged at the `INFO`
    /// level every `print_step` iterations.
    ///
    /// # Errors
    ///
    /// See [`LocalBestPSO::optimize_with`].
    pub fn optimize<E>(
        &mut self,
        func: &dyn CostFunction<(), E>,
        iters: usize,
        verbose: bool,
    ) -> Result<(Float, Option<DVector<Float>>), OptimizeError<E>> {
        self.optimize_with(func, &mut (), iters, verbose, Callbacks::empty())
    }
    /// Run up to `iters` iterations on an objective with user data and extra callbacks.
    ///
    /// The swarm continues from its current state, and the history keeps growing until
    /// [`LocalBestPSO::reset`] is called. After every iteration the history is recorded, then
    /// `callbacks` run in order, then the `ftol` criterion is checked. Any of them may stop the
    /// run, and the stopping iteration is still recorded.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::Objective`] if the objective fails and
    /// [`OptimizeError::CostShape`] if it returns a cost vector whose length is not the number of
    /// particles.
    pub fn optimize_with<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
        iters: usize,
        verbose: bool,
        mut callbacks: Callbacks<SwarmStatus>,
    ) -> Result<(Float, Option<DVector<Float>>), OptimizeError<E>> {
        self.status.reset();
        self.ftol.reset();
        let print_step = self.config.print_step;
        if verbose {
            tracing::info!(
                n_particles = self.config.n_particles,
                dimensions = self.config.dimensions,
                iters,
                "Optimize for {} iters with {:?}",
                iters,
                self.config.options
            );
        }
        for current_step in 0..iters {
            self.step(func, user_data)?;
            self.history.observe(current_step, &self.status);
            tracing::debug!(
                step = current_step,
                best_cost = self.status.best_cost(),
                "local-best PSO step"
            );
            if verbose && (current_step + 1) % print_step == 0 {
                tracing::info!(
                    "Iteration {}/{}, best cost: {:.6e}",
                    current_step + 1,
                    iters,
                    self.status.best_cost()
                );
            }
            if callbacks
                .check_for_termination(current_step, &mut self.status)
                .is_break()
            {
                if self.status.message().is_empty() {
                    self.status.update_message("Stopped by callback");
                }
                break;
            }
            if self
                .ftol
                .check_for_termination(current_step, &mut self.status)
                .is_break()
            {
                tracing::info!(
                    "Stopped early after {} iterations: {}",
                    current_step + 1,
                    self.status.message()
                );
                break;
            }
        }
        if self.status.message().is_empty() {
            self.status
                .update_message(&format!("Maximum number of iterations reached ({})", iters));
        }
        if verbose {
            tracing::info!(
                "Optimization finished | best cost: {}, best pos: {:?}",
                self.status.best_cost(),
                self.status.best_pos().map(|p| p.as_slice())
            );
        }
        Ok((self.status.best_cost(), self.status.best_pos().cloned()))
    }
    fn step<U, E>(
        &mut self,
        func: &dyn CostFunction<U, E>,
        user_data: &mut U,
    ) -> Result<(), OptimizeError<E>> {
        let n_particles = self.config.n_particles;
        let costs = func
            .evaluate(&self.status.swarm.position, user_data)
            .map_err(OptimizeError::Objective)?;
        if costs.len() != n_particles {
            return Err(OptimizeError::CostShape {
                expected: n_particles,
                found: costs.len(),
            });
        }
        if costs.iter().any(|c| !c.is_finite()) {
            maybe_warn("The objective function returned non-finite costs");
        }
        self.status.n_f_evals += n_particles;
        self.status.n_iters += 1;
        let swarm = &mut self.status.swarm;
        swarm.update_personal_bests(&costs);
        swarm.update_global_best();
        self.status.local_bests = self.topology.local_bests(&self.status.swarm);
        let swarm = &mut self.status.swarm;
        swarm.update_velocity(
            &self.config.options,
            &self.status.local_bests.position,
            self.config.velocity_clamp.as_ref(),
            &mut self.rng,
        );
        swarm.update_position(self.config.bounds.as_ref());
        Ok(())
    }
    /// The lowest cost found by the swarm (`+inf` before the first iteration).
    pub const fn best_cost(&self) -> Float {
        self.status.best_cost()
    }
    /// The position of the lowest cost found by the swarm, if any.
    pub const fn best_pos(&self) -> Option<&DVector<Float>> {
        self.status.best_pos()
    }
    /// The validated configuration of the optimizer.
    pub const fn config(&self) -> &ValidatedConfig {
        &self.config
    }
    /// The current state of the swarm.
    pub const fn swarm(&self) -> &Swarm {
        &self.status.swarm
    }
    /// The status of the current (or last) run.
    pub const fn status(&self) -> &SwarmStatus {
        &self.status
    }
    /// The neighborhood bests computed during the last iteration.
    pub const fn local_bests(&self) -> &LocalBests {
        &self.status.local_bests
    }
    /// Every trace recorded since construction or the last [`LocalBestPSO::reset`].
    pub const fn history(&self) -> &History {
        &self.history
    }
    /// The best cost after each iteration.
    pub fn cost_history(&self) -> &[Float] {
        &self.history.cost
    }
    /// The mean personal-best cost after each iteration.
    pub fn mean_pbest_history(&self) -> &[Float] {
        &self.history.mean_pbest
    }
    /// The mean neighborhood-best cost after each iteration.
    pub fn mean_neighbor_history(&self) -> &[Float] {
        &self.history.mean_neighbor
    }
    /// The particle positions after each iteration.
    pub fn pos_history(&self) -> &[DMatrix<Float>] {
        &self.history.position
    }
    /// The particle velocities after each iteration.
    pub fn velocity_history(&self) -> &[DMatrix<Float>] {
        &self.history.velocity
    }
    /// A summary of the current (or last) run.
    pub fn summary(&self) -> SwarmSummary {
        SwarmSummary {
            bounds: self.config.bounds.clone(),
            best_cost: self.status.best_cost(),
            best_pos: self
                .status
                .best_pos()
                .map(|p| p.iter().copied().collect()),
            n_iters: self.status.n_iters,
            cost_evals: self.status.n_f_evals,
            converged: self.status.converged(),
            message: self.status.message().to_string(),
        }
    }
}
