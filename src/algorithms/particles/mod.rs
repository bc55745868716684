/// Implementation of the local-best Particle Swarm Optimization (PSO) algorithm
pub mod lbest;
pub use lbest::{LocalBestConfig, LocalBestPSO};

/// [`Swarm`] type holding the particle state.
pub mod swarm;
pub use swarm::Swarm;

/// Nearest-neighbor topology and [`LocalBests`].
pub mod topology;
pub use topology::{nearest_neighbors, LocalBests, NearestNeighbors};

/// [`SwarmStatus`] type for swarm-based optimizers.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;

/// [`History`] observer recording per-iteration traces.
pub mod history;
pub use history::History;

/// [`FTolTerminator`] for stopping on a stalled best cost.
pub mod convergence;
pub use convergence::FTolTerminator;
