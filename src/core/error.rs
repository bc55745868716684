use thiserror::Error;

/// Errors raised while validating the configuration of an optimizer.
///
/// These are always raised before any swarm state is allocated or any random number is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more of the mandatory options (`c1`, `c2`, `w`, `k`, `p`) is missing.
    #[error("missing option(s): {}", .keys.join(", "))]
    MissingOption {
        /// The names of the missing options, in canonical order.
        keys: Vec<String>,
    },
    /// A value lies outside of its allowed range (including `min >= max` pairs).
    #[error("invalid value: {0}")]
    InvalidRange(String),
    /// An argument has the wrong number of elements.
    #[error("invalid shape: {0}")]
    Shape(String),
    /// An argument was given as the wrong kind of container.
    #[error("invalid argument type: {0}")]
    Type(String),
}

/// Errors raised while running an optimizer.
#[derive(Debug, Error)]
pub enum OptimizeError<E> {
    /// The objective function returned an error.
    #[error("objective function failed: {0}")]
    Objective(E),
    /// The objective function returned the wrong number of costs.
    #[error("objective function returned {found} costs for a swarm of {expected} particles")]
    CostShape {
        /// The number of particles in the swarm.
        expected: usize,
        /// The length of the returned cost vector.
        found: usize,
    },
}
