/// [`Arg`] type for loosely-shaped configuration arguments.
pub mod args;
/// [`Bound`] type for binding variables to a range.
pub mod bound;
/// [`Callbacks`] container and some generic [`Observer`](crate::traits::Observer)s and
/// [`Terminator`](crate::traits::Terminator)s.
pub mod callbacks;
/// Error types for configuration and optimization.
pub mod error;
/// [`Options`] type holding the swarm hyperparameters.
pub mod options;
/// [`SwarmSummary`] type for the result of an optimization.
pub mod summary;
/// Random sampling helpers and user-facing warnings.
pub mod utils;
/// The ordered configuration validation pipeline.
pub mod validation;

pub use args::Arg;
pub use bound::{Bound, Bounds};
pub use callbacks::{Callbacks, DebugObserver, MaxSteps};
pub use error::{ConfigError, OptimizeError};
pub use options::{Norm, OptionMap, Options};
pub use summary::SwarmSummary;
pub use validation::{validate, ValidatedConfig};
