use std::convert::Infallible;

use crate::{traits::CostFunction, DMatrix, DVector, Float};

/// The Rosenbrock function, a non-convex function with a single minimum, evaluated on every row.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`n \geq 2`$. This function has a minimum at $`f(\vec{1}) = 0`$.
pub struct Rosenbrock;
impl CostFunction for Rosenbrock {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(
        &self,
        x: &DMatrix<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        Ok(DVector::from_iterator(
            x.nrows(),
            x.row_iter().map(|row| {
                row.iter()
                    .zip(row.iter().skip(1))
                    .map(|(xi, xn)| 100.0 * (xn - xi.powi(2)).powi(2) + (1.0 - xi).powi(2))
                    .sum::<Float>()
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;

    #[test]
    fn test_rosenbrock() {
        let x = dmatrix![1.0, 1.0, 1.0; 0.0, 0.0, 0.0; -1.0, 1.0, 2.0];
        let y = Rosenbrock.evaluate(&x, &mut ()).unwrap();
        assert_relative_eq!(y[0], 0.0);
        assert_relative_eq!(y[1], 2.0);
        assert_relative_eq!(y[2], 4.0 + 100.0 + 0.0);
    }
}
