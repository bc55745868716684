use std::convert::Infallible;

use crate::{DMatrix, DVector, Float};

/// A trait which describes a vectorized objective $`f(\mathbb{R}^{n \times d}) \to \mathbb{R}^n`$
///
/// The whole swarm is evaluated in a single call: the input has one row per particle and one
/// column per dimension, and the output must contain one cost per row. Such a function may also
/// take a `user_data: &mut U` field which can be used to pass external arguments to the function
/// during optimization, or can be modified by the function itself.
///
/// The `CostFunction` trait takes a generic `U` representing the type of user data/arguments
/// and a generic `E` representing any possible errors that might be returned during function
/// execution.
///
/// Any closure `Fn(&DMatrix<Float>) -> DVector<Float>` is a `CostFunction` with no user data.
pub trait CostFunction<U = (), E = Infallible> {
    /// The evaluation of the function at every row of `x` with the given arguments/user data.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the evaluation fails. Users should implement this trait to return a
    /// [`std::convert::Infallible`] if the function evaluation never fails.
    fn evaluate(&self, x: &DMatrix<Float>, user_data: &mut U) -> Result<DVector<Float>, E>;
}

impl<F> CostFunction for F
where
    F: Fn(&DMatrix<Float>) -> DVector<Float>,
{
    fn evaluate(
        &self,
        x: &DMatrix<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(self(x))
    }
}
