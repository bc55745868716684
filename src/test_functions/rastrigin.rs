use std::convert::Infallible;

use crate::{traits::CostFunction, DMatrix, DVector, Float, PI};

/// The Rastrigin function, a non-convex function with a single minimum but many local minima,
/// evaluated on every row.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^n (x_i^2 - 10cos(2\pi x_i))
/// ```
/// where $`x_i \in [-5.12, 5.12]`$. The global minimum is $`f(\vec{0}) = 0`$.
pub struct Rastrigin;
impl CostFunction for Rastrigin {
    #[allow(clippy::suboptimal_flops)]
    fn evaluate(
        &self,
        x: &DMatrix<Float>,
        _user_data: &mut (),
    ) -> Result<DVector<Float>, Infallible> {
        let n = x.ncols() as Float;
        Ok(DVector::from_iterator(
            x.nrows(),
            x.row_iter().map(|row| {
                10.0 * n
                    + row
                        .iter()
                        .map(|xi| xi.powi(2) - 10.0 * Float::cos(2.0 * PI * xi))
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
    fn test_rastrigin() {
        let x = dmatrix![0.0, 0.0; 1.0, 0.0; 0.5, 0.5];
        let y = Rastrigin.evaluate(&x, &mut ()).unwrap();
        assert_relative_eq!(y[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(y[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(y[2], 40.5, epsilon = 1e-12);
    }
}
