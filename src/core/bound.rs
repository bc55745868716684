use crate::{DMatrix, Float};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, ops::Deref};

/// A closed interval `[lower, upper]` used to bind a parameter (or a velocity) to a range.
///
/// [`Bound`]s are only constructed by the validation pipeline, which guarantees
/// `lower < upper`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bound {
    lower: Float,
    upper: Float,
}
impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

impl Bound {
    pub(crate) const fn new(lower: Float, upper: Float) -> Self {
        Self { lower, upper }
    }
    /// Returns the lower end of the interval.
    pub const fn lower(&self) -> Float {
        self.lower
    }
    /// Returns the upper end of the interval.
    pub const fn upper(&self) -> Float {
        self.upper
    }
    /// Checks whether the given `value` is compatible with the bound.
    pub fn contains(&self, value: Float) -> bool {
        value >= self.lower && value <= self.upper
    }
    /// Pulls `value` back onto the nearest end of the interval if it lies outside of it.
    pub fn clip(&self, value: Float) -> Float {
        value.clamp(self.lower, self.upper)
    }
    /// Checks if the given value is equal to one of the ends of the interval.
    pub fn at_bound(&self, value: Float) -> bool {
        value == self.lower || value == self.upper
    }
}

/// A struct that contains one [`Bound`] per dimension.
#[derive(Default, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bounds(Vec<Bound>);

impl Bounds {
    /// Clips every column of `positions` (one column per dimension) into its bound.
    pub fn clip_columns(&self, positions: &mut DMatrix<Float>) {
        for (mut column, bound) in positions.column_iter_mut().zip(self.iter()) {
            column.apply(|x| *x = bound.clip(*x));
        }
    }
    /// Checks whether every row of `positions` lies inside of the bounds.
    pub fn contains_rows(&self, positions: &DMatrix<Float>) -> bool {
        positions
            .column_iter()
            .zip(self.iter())
            .all(|(column, bound)| column.iter().all(|x| bound.contains(*x)))
    }
}

impl From<Vec<Bound>> for Bounds {
    fn from(value: Vec<Bound>) -> Self {
        Self(value)
    }
}

impl Deref for Bounds {
    type Target = Vec<Bound>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;

    fn sample_bounds() -> Bounds {
        vec![Bound::new(-1.0, 1.0), Bound::new(0.0, 5.0)].into()
    }

    #[test]
    fn test_bound_contains_and_clip() {
        let b = Bound::new(-2.0, 3.0);
        assert!(b.contains(0.0));
        assert!(!b.contains(3.5));
        assert_eq!(b.clip(3.5), 3.0);
        assert_eq!(b.clip(-7.0), -2.0);
        assert_eq!(b.clip(1.25), 1.25);
        assert!(b.at_bound(-2.0));
        assert!(!b.at_bound(0.0));
        assert_eq!((b.lower(), b.upper()), (-2.0, 3.0));
    }

    #[test]
    fn test_clip_columns() {
        let bounds = sample_bounds();
        let mut x = dmatrix![-3.0, 2.0; 0.5, 9.0; 1.5, -1.0];
        assert!(!bounds.contains_rows(&x));
        bounds.clip_columns(&mut x);
        assert_eq!(x, dmatrix![-1.0, 2.0; 0.5, 5.0; 1.0, 0.0]);
        assert!(bounds.contains_rows(&x));
    }
}
