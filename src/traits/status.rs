use serde::{de::DeserializeOwned, Serialize};

/// A trait which holds the status of an optimizer run and has to be implemented for statuses
/// that need to be driven by [`Callbacks`](crate::core::Callbacks).
pub trait Status: Clone + Default + Serialize + DeserializeOwned {
    /// Resets the run-level information of the status (messages and flags). This is called at
    /// the beginning of every optimization run.
    /// Take care that this does not reset any state that is needed to be kept between runs,
    /// such as the positions of a swarm.
    fn reset(&mut self);
    /// Returns the convergence flag of the optimization.
    fn converged(&self) -> bool;
    /// Returns the message of the optimization.
    fn message(&self) -> &str;
    /// Sets the message of the optimization.
    fn update_message(&mut self, message: &str);
}
