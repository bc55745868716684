use crate::traits::{Observer, Status, Terminator};
use std::{fmt::Debug, ops::ControlFlow};

enum CallbackLike<S> {
    Terminator(Box<dyn Terminator<S>>),
    Observer(Box<dyn Observer<S>>),
}
impl<S: Status> CallbackLike<S> {
    fn callback(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        match self {
            Self::Terminator(terminator) => terminator.check_for_termination(current_step, status),
            Self::Observer(observer) => {
                observer.observe(current_step, status);
                ControlFlow::Continue(())
            }
        }
    }
}

/// A set of [`Terminator`]s and/or [`Observer`]s which can be passed to
/// [`LocalBestPSO::optimize_with`](crate::algorithms::particles::LocalBestPSO::optimize_with).
///
/// Callbacks run in the order they were added, once per executed iteration. The first
/// [`Terminator`] which requests a stop ends the run, and callbacks added after it are skipped for
/// that iteration.
pub struct Callbacks<S>(Vec<CallbackLike<S>>);
impl<S> Default for Callbacks<S> {
    fn default() -> Self {
        Self::empty()
    }
}
impl<S> Callbacks<S> {
    /// Create an empty set of callbacks.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Return the set of [`Callbacks`] with an additional [`Terminator`] added.
    pub fn with_terminator<T>(mut self, terminator: T) -> Self
    where
        T: Terminator<S> + 'static,
        S: Status,
    {
        self.0.push(CallbackLike::Terminator(Box::new(terminator)));
        self
    }

    /// Return the set of [`Callbacks`] with an additional [`Observer`] added.
    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: Observer<S> + 'static,
        S: Status,
    {
        self.0.push(CallbackLike::Observer(Box::new(observer)));
        self
    }

    /// Returns the number of callbacks in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no callbacks.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl<S: Status> Terminator<S> for Callbacks<S> {
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        if self
            .0
            .iter_mut()
            .any(|callback| callback.callback(current_step, status).is_break())
        {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A [`Terminator`] which terminates the algorithm after a number of steps.
///
/// Steps are counted from zero, so `MaxSteps(10)` stops the run after the tenth iteration.
pub struct MaxSteps(pub usize);
impl Default for MaxSteps {
    fn default() -> Self {
        Self(1000)
    }
}
impl<S: Status> Terminator<S> for MaxSteps {
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        if current_step >= self.0.saturating_sub(1) {
            status.update_message(&format!("Maximum number of steps reached ({})!", self.0));
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }
}

/// A debugging callback which logs the step and status at the current step of an algorithm.
///
/// The status is emitted as a `tracing` event at the `DEBUG` level.
///
/// # Usage:
///
/// ```rust
/// use fastrand::Rng;
/// use lbpso::prelude::*;
/// use lbpso::core::DebugObserver;
/// use lbpso::test_functions::Sphere;
///
/// let config = LocalBestConfig::new(
///     6,
///     2,
///     [("c1", 0.5), ("c2", 0.3), ("w", 0.9), ("k", 2.0), ("p", 2.0)],
/// );
/// let mut pso = LocalBestPSO::new(config, Rng::with_seed(1)).unwrap();
/// let (best_cost, _) = pso
///     .optimize_with(&Sphere, &mut (), 5, false, Callbacks::empty().with_observer(DebugObserver))
///     .unwrap();
/// // ^ This will emit a debug event for each step
/// assert!(best_cost.is_finite());
/// ```
pub struct DebugObserver;
impl<S> Observer<S> for DebugObserver
where
    S: Status + Debug,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        tracing::debug!("Step: {}\n{:#?}", current_step, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde::{Deserialize, Serialize};
    use std::{cell::RefCell, rc::Rc, sync::Arc};

    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    struct TestStatus {
        converged: bool,
        message: String,
    }
    impl Status for TestStatus {
        fn reset(&mut self) {
            self.converged = false;
            self.message = String::new();
        }
        fn converged(&self) -> bool {
            self.converged
        }
        fn message(&self) -> &str {
            &self.message
        }
        fn update_message(&mut self, message: &str) {
            self.message = message.to_string();
        }
    }

    #[derive(Default)]
    struct CountingObserver(usize);
    impl Observer<TestStatus> for CountingObserver {
        fn observe(&mut self, _current_step: usize, _status: &TestStatus) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_max_steps() {
        let mut status = TestStatus::default();
        let mut max_steps = MaxSteps(3);
        assert!(max_steps.check_for_termination(0, &mut status).is_continue());
        assert!(max_steps.check_for_termination(1, &mut status).is_continue());
        assert!(max_steps.check_for_termination(2, &mut status).is_break());
        assert_eq!(status.message(), "Maximum number of steps reached (3)!");
    }

    #[test]
    fn test_callbacks_run_in_order_and_stop_at_first_break() {
        let before = Rc::new(RefCell::new(CountingObserver::default()));
        let after = Arc::new(Mutex::new(CountingObserver::default()));
        let mut callbacks = Callbacks::empty()
            .with_observer(before.clone())
            .with_terminator(MaxSteps(2))
            .with_observer(after.clone());
        assert_eq!(callbacks.len(), 3);
        let mut status = TestStatus::default();
        assert!(callbacks.check_for_termination(0, &mut status).is_continue());
        assert!(callbacks.check_for_termination(1, &mut status).is_break());
        assert_eq!(before.borrow().0, 2);
        assert_eq!(after.lock().0, 1);
    }

    #[test]
    fn test_empty_callbacks_never_stop() {
        let mut callbacks = Callbacks::<TestStatus>::default();
        assert!(callbacks.is_empty());
        let mut status = TestStatus::default();
        assert!(callbacks.check_for_termination(100, &mut status).is_continue());
    }
}
