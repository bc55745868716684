use parking_lot::{Mutex, RwLock};
use std::{cell::RefCell, ops::ControlFlow, rc::Rc, sync::Arc};

use crate::traits::Status;

/// A trait for all kinds of terminators used by optimizers.
///
/// A [`Terminator`] is checked once per executed iteration and may mutate the [`Status`] (for
/// instance to mark it as converged and leave a message) before requesting a stop with
/// [`ControlFlow::Break`].
pub trait Terminator<S: Status> {
    /// A termination check which is called after each iteration of an optimizer.
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()>;
}
impl<T, S> Terminator<S> for Rc<RefCell<T>>
where
    T: Terminator<S>,
    S: Status,
{
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        self.borrow_mut().check_for_termination(current_step, status)
    }
}
impl<T, S> Terminator<S> for Arc<RwLock<T>>
where
    T: Terminator<S>,
    S: Status,
{
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        self.write().check_for_termination(current_step, status)
    }
}
impl<T, S> Terminator<S> for Arc<Mutex<T>>
where
    T: Terminator<S>,
    S: Status,
{
    fn check_for_termination(&mut self, current_step: usize, status: &mut S) -> ControlFlow<()> {
        self.lock().check_for_termination(current_step, status)
    }
}

/// A trait for all kinds of observers used by optimizers.
///
/// This is the most restrictive type of callback and is not able to mutate any of its inputs
/// aside from itself.
pub trait Observer<S: Status> {
    /// An observation method which is called after each iteration of an optimizer.
    fn observe(&mut self, current_step: usize, status: &S);
}
impl<O, S> Observer<S> for Rc<RefCell<O>>
where
    O: Observer<S>,
    S: Status,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.borrow_mut().observe(current_step, status)
    }
}
impl<O, S> Observer<S> for Arc<RwLock<O>>
where
    O: Observer<S>,
    S: Status,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.write().observe(current_step, status)
    }
}
impl<O, S> Observer<S> for Arc<Mutex<O>>
where
    O: Observer<S>,
    S: Status,
{
    fn observe(&mut self, current_step: usize, status: &S) {
        self.lock().observe(current_step, status)
    }
}
