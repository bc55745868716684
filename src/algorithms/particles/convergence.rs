use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::{algorithms::particles::SwarmStatus, traits::Terminator, Float};

/// A [`Terminator`] which stops a swarm once its best cost has stalled.
///
/// An iteration is stalled if the best cost moved by less than a fraction `ftol` of the best cost
/// one iteration earlier:
///
/// ```math
/// |f^{t} - f^{t-1}| < \text{ftol} \cdot (1 + |f^{t-1}|)
/// ```
/// The run stops once `ftol_iter` consecutive iterations are stalled. With the default
/// `ftol = -inf` no iteration is ever stalled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FTolTerminator {
    /// The fractional tolerance.
    pub ftol: Float,
    /// The number of consecutive stalled iterations needed to stop.
    pub ftol_iter: usize,
    previous: Float,
    n_stalled: usize,
}

impl Default for FTolTerminator {
    fn default() -> Self {
        Self::new(Float::NEG_INFINITY, 1)
    }
}

impl FTolTerminator {
    /// Create a new terminator with the given tolerance and window.
    pub const fn new(ftol: Float, ftol_iter: usize) -> Self {
        Self {
            ftol,
            ftol_iter,
            previous: Float::INFINITY,
            n_stalled: 0,
        }
    }
    /// Forget the previously seen best cost and any stalled iterations.
    pub fn reset(&mut self) {
        self.previous = Float::INFINITY;
        self.n_stalled = 0;
    }
    /// The number of consecutive stalled iterations seen so far.
    pub const fn n_stalled(&self) -> usize {
        self.n_stalled
    }
    /// Records a new best cost and returns `true` if the stall window is full.
    pub fn update(&mut self, best_cost: Float) -> bool {
        let stalled =
            (best_cost - self.previous).abs() < self.ftol * (1.0 + self.previous.abs());
        self.previous = best_cost;
        if stalled {
            self.n_stalled += 1;
        } else {
            self.n_stalled = 0;
        }
        self.n_stalled >= self.ftol_iter
    }
}

impl Terminator<SwarmStatus> for FTolTerminator {
    fn check_for_termination(
        &mut self,
        current_step: usize,
        status: &mut SwarmStatus,
    ) -> ControlFlow<()> {
        if self.update(status.swarm.best_cost) {
            status.converged = true;
            status.message = format!(
                "best cost stalled within ftol = {} for {} iteration(s) (step {})",
                self.ftol, self.ftol_iter, current_step
            );
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_never_stalls() {
        let mut ftol = FTolTerminator::default();
        for _ in 0..10 {
            assert!(!ftol.update(1.0));
        }
        assert_eq!(ftol.n_stalled(), 0);
    }

    #[test]
    fn test_first_iteration_never_stalls() {
        let mut ftol = FTolTerminator::new(Float::INFINITY, 1);
        assert!(!ftol.update(Float::INFINITY));
        let mut ftol = FTolTerminator::new(0.5, 1);
        assert!(!ftol.update(100.0));
    }

    #[test]
    fn test_window_of_consecutive_stalls() {
        let mut ftol = FTolTerminator::new(0.1, 3);
        assert!(!ftol.update(10.0));
        assert!(!ftol.update(9.5));
        assert!(!ftol.update(9.4));
        // a large improvement restarts the window
        assert!(!ftol.update(5.0));
        assert_eq!(ftol.n_stalled(), 0);
        assert!(!ftol.update(5.0));
        assert!(!ftol.update(5.0));
        assert!(ftol.update(5.0));
        ftol.reset();
        assert_eq!(ftol.n_stalled(), 0);
        assert!(!ftol.update(5.0));
    }

    #[test]
    fn test_terminator_marks_status() {
        let mut status = SwarmStatus::default();
        status.swarm.best_cost = 1.0;
        let mut ftol = FTolTerminator::new(0.1, 1);
        assert!(ftol.check_for_termination(0, &mut status).is_continue());
        assert!(ftol.check_for_termination(1, &mut status).is_break());
        assert!(status.converged);
        assert!(status.message.contains("ftol"));
    }
}
