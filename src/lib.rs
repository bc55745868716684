//! `lbpso` provides a local-best particle swarm optimizer (PSO) with a straightforward,
//! trait-based interface. The user implements the [`CostFunction`](traits::CostFunction) trait
//! on some struct (or simply passes a closure) which takes the whole `(n_particles, dimensions)`
//! position matrix of the swarm and returns one cost per particle
//! ($`f(\mathbb{R}^{n \times d}) \to \mathbb{R}^n`$).
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [The Algorithm](#the-algorithm)
//! - [Configuration Errors](#configuration-errors)
//!
//! # Key Features
//! * A local-best ("neighborhood") topology: every particle is pulled toward the best personal
//!   best among its `k` nearest neighbors instead of the best of the whole swarm.
//! * Validation of every hyperparameter and shape before any random number is drawn.
//! * Explicit, seedable random number generators for reproducible runs.
//! * Per-iteration history of costs, positions, and velocities.
//! * Early stopping on a fractional tolerance of the best cost (`ftol`).
//!
//! # Quick Start
//!
//! ```rust
//! use fastrand::Rng;
//! use lbpso::prelude::*;
//! use lbpso::test_functions::Sphere;
//!
//! let config = LocalBestConfig::new(
//!     10,
//!     2,
//!     [("c1", 0.5), ("c2", 0.3), ("w", 0.9), ("k", 3.0), ("p", 2.0)],
//! )
//! .with_bounds((vec![-5.0, -5.0], vec![5.0, 5.0]));
//! let mut pso = LocalBestPSO::new(config, Rng::with_seed(0)).unwrap();
//! let (best_cost, best_pos) = pso.optimize(&Sphere, 100, false).unwrap();
//! assert!(best_cost < 1.0);
//! assert_eq!(best_pos.unwrap().len(), 2);
//! assert_eq!(pso.cost_history().len(), 100);
//! ```
//!
//! # The Algorithm
//!
//! Each iteration, the objective is evaluated on the full position matrix, personal bests and
//! the swarm-wide best are updated, and every particle's velocity is updated as
//!
//! ```math
//! v_{i}^{t+1} = w v_{i}^t + c_1 r_{1} (p_{i}^t - x_{i}^t) + c_2 r_{2} (l_{i}^t - x_{i}^t)
//! ```
//! where $`p_i`$ is the particle's personal best, $`l_i`$ is the best personal best among its
//! `k` nearest neighbors (measured with the Manhattan (`p = 1`) or Euclidean (`p = 2`) norm),
//! and $`r_1, r_2`$ are uniform draws in $`[0, 1)`$. Velocities are optionally clamped and
//! positions are optionally clipped to the bounding box.
//!
//! # Configuration Errors
//!
//! Bounds, velocity clamps, and initial positions are given as [`Arg`](core::Arg)s, a loosely
//! shaped argument type which mirrors what arrives from configuration files. Constructing a
//! [`LocalBestPSO`](algorithms::particles::LocalBestPSO) reports a
//! [`ConfigError`](core::ConfigError) tagged as a missing option, an invalid range, a bad shape,
//! or a bad container type.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing optimization algorithms.
pub mod algorithms;
/// Module containing configuration, errors, callbacks, and other building blocks.
pub mod core;
/// Module containing standard functions for testing algorithms.
pub mod test_functions;
/// Module containing the traits used throughout the crate.
pub mod traits;

pub use nalgebra::{DMatrix, DVector};

/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used throughout the crate (`f64` unless the `f32` feature is enabled).
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;
/// The mathematical constant $`\pi`$.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::particles::{LocalBestConfig, LocalBestPSO},
        core::{Arg, Callbacks, ConfigError, Norm, OptimizeError, OptionMap, Options},
        traits::CostFunction,
        DMatrix, DVector, Float,
    };
}
