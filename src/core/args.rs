use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{DMatrix, DVector, Float};

/// A loosely-shaped numeric argument.
///
/// Bounds, velocity clamps, and initial positions arrive in many shapes (configuration files,
/// foreign callers, hand-written literals), and the optimizer requires specific ones: bounds and
/// velocity clamps must be fixed ordered pairs ([`Arg::Tuple`]) while initial positions must be
/// array-like ([`Arg::List`], [`Arg::Vector`], or [`Arg::Matrix`]). Keeping the container kind
/// around until validation lets the optimizer report a [`ConfigError::Type`](super::ConfigError)
/// for the wrong container and a [`ConfigError::Shape`](super::ConfigError) for the wrong size.
///
/// Most values convert into an [`Arg`] with [`From`]:
///
/// ```rust
/// use lbpso::core::Arg;
/// use nalgebra::dvector;
///
/// assert!(matches!(Arg::from((1.0, 3.0)), Arg::Tuple(_)));
/// assert!(matches!(Arg::from(vec![1.0, 3.0]), Arg::List(_)));
/// assert!(matches!(Arg::from(dvector![1.0, 3.0]), Arg::Vector(_)));
/// assert!(matches!(Arg::from([1.0, 3.0]), Arg::Vector(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arg {
    /// A single number.
    Scalar(Float),
    /// A fixed ordered tuple of arguments.
    Tuple(Vec<Arg>),
    /// A growable list of arguments.
    List(Vec<Arg>),
    /// A one-dimensional array.
    Vector(DVector<Float>),
    /// A two-dimensional array.
    Matrix(DMatrix<Float>),
}

impl Arg {
    /// The name of the container kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::List(_) => "list",
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
        }
    }
    /// Returns the value if this argument is a [`Arg::Scalar`].
    pub const fn as_scalar(&self) -> Option<Float> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }
    /// Returns the number of top-level elements (rows for a matrix, `1` for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Tuple(items) | Self::List(items) => items.len(),
            Self::Vector(v) => v.len(),
            Self::Matrix(m) => m.nrows(),
        }
    }
    /// Returns `true` if the argument has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns `true` if the argument is a one- or two-dimensional array-like container.
    pub const fn is_sequence(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }
    /// Flattens a one-dimensional sequence of scalars into a [`Vec`].
    ///
    /// Returns `None` for scalars, for matrices with more than one row and more than one column,
    /// and for sequences with non-scalar elements.
    pub fn to_flat_vec(&self) -> Option<Vec<Float>> {
        match self {
            Self::Scalar(_) => None,
            Self::Tuple(items) | Self::List(items) => items.iter().map(Self::as_scalar).collect(),
            Self::Vector(v) => Some(v.iter().copied().collect()),
            Self::Matrix(m) if m.nrows() == 1 || m.ncols() == 1 => {
                Some(m.iter().copied().collect())
            }
            Self::Matrix(_) => None,
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{}", value),
            Self::Tuple(items) | Self::List(items) => {
                let (open, close) = if matches!(self, Self::Tuple(_)) {
                    ("(", ")")
                } else {
                    ("[", "]")
                };
                write!(f, "{}", open)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "{}", close)
            }
            Self::Vector(v) => write!(f, "vector(len = {})", v.len()),
            Self::Matrix(m) => write!(f, "matrix({} x {})", m.nrows(), m.ncols()),
        }
    }
}

impl From<Float> for Arg {
    fn from(value: Float) -> Self {
        Self::Scalar(value)
    }
}
impl<A: Into<Arg>, B: Into<Arg>> From<(A, B)> for Arg {
    fn from(value: (A, B)) -> Self {
        Self::Tuple(vec![value.0.into(), value.1.into()])
    }
}
impl<A: Into<Arg>, B: Into<Arg>, C: Into<Arg>> From<(A, B, C)> for Arg {
    fn from(value: (A, B, C)) -> Self {
        Self::Tuple(vec![value.0.into(), value.1.into(), value.2.into()])
    }
}
impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}
impl<const N: usize> From<[Float; N]> for Arg {
    fn from(value: [Float; N]) -> Self {
        Self::Vector(DVector::from_row_slice(&value))
    }
}
impl From<DVector<Float>> for Arg {
    fn from(value: DVector<Float>) -> Self {
        Self::Vector(value)
    }
}
impl From<DMatrix<Float>> for Arg {
    fn from(value: DMatrix<Float>) -> Self {
        Self::Matrix(value)
    }
}
