use std::convert::Infallible;

use crate::{traits::CostFunction, DMatrix, DVector, Float};

/// A generalized spherical function with a single minimum, evaluated on every row.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// The global minimum is at $`f(\vec{0}) = 0`$.
pub struct Sphere;
impl CostFunction for Sphere {
    fn evaluate(
        &self,
        x: &DMatrix<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(DVector::from_iterator(
            x.nrows(),
            x.row_iter().map(|row| row.norm_squared()),
        ))
    }
}
