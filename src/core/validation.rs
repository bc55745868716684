use serde::{Deserialize, Serialize};

use crate::{
    algorithms::particles::LocalBestConfig,
    core::{Arg, Bound, Bounds, ConfigError, Options},
    DMatrix, Float,
};

/// The half-width of the default symmetric range used to draw positions when no bounds are
/// given.
pub const DEFAULT_POSITION_LIMIT: Float = 1.0;
/// The fraction of the position range used for default initial velocities.
pub const DEFAULT_VELOCITY_SCALE: Float = 0.1;

/// A configuration which has passed every check of [`validate`].
///
/// Only [`validate`] constructs this type, so holding one is proof that the configuration is
/// consistent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidatedConfig {
    /// The number of particles in the swarm.
    pub n_particles: usize,
    /// The number of dimensions of the search space.
    pub dimensions: usize,
    /// The swarm hyperparameters.
    pub options: Options,
    /// The bounding box of the search space, if any.
    pub bounds: Option<Bounds>,
    /// The range every velocity component is clipped to, if any.
    pub velocity_clamp: Option<Bound>,
    /// The initial positions of the particles, if any.
    pub init_pos: Option<DMatrix<Float>>,
    /// The fractional tolerance of the convergence check.
    pub ftol: Float,
    /// The number of consecutive stalled iterations which trigger an early stop.
    pub ftol_iter: usize,
    /// The number of iterations between progress reports when running verbosely.
    pub print_step: usize,
}

impl ValidatedConfig {
    /// The per-dimension range used to draw random initial positions: the bounds if given,
    /// otherwise `[-1, 1)`.
    pub fn position_limits(&self) -> Vec<(Float, Float)> {
        self.bounds.as_ref().map_or_else(
            || vec![(-DEFAULT_POSITION_LIMIT, DEFAULT_POSITION_LIMIT); self.dimensions],
            |bounds| bounds.iter().map(|b| (b.lower(), b.upper())).collect(),
        )
    }
    /// The per-dimension range used to draw random initial velocities: the velocity clamp if
    /// given, otherwise a tenth of the position range on either side of zero.
    pub fn velocity_limits(&self) -> Vec<(Float, Float)> {
        self.velocity_clamp.map_or_else(
            || {
                self.position_limits()
                    .into_iter()
                    .map(|(lb, ub)| {
                        let half = DEFAULT_VELOCITY_SCALE * (ub - lb);
                        (-half, half)
                    })
                    .collect()
            },
            |clamp| vec![(clamp.lower(), clamp.upper()); self.dimensions],
        )
    }
}

/// Runs the ordered validation pipeline on a raw [`LocalBestConfig`].
///
/// The checks run in a fixed order: swarm size, options, bounds, velocity clamp, initial
/// positions, and finally the convergence and reporting settings. The first failing check is
/// reported. This function is pure and never touches a random number generator.
///
/// # Errors
///
/// Returns a [`ConfigError`] describing the first failed check.
pub fn validate(config: &LocalBestConfig) -> Result<ValidatedConfig, ConfigError> {
    let n_particles = config.n_particles;
    let dimensions = config.dimensions;
    if n_particles < 2 {
        return Err(ConfigError::InvalidRange(format!(
            "a local-best swarm needs at least 2 particles, got {}",
            n_particles
        )));
    }
    if dimensions < 1 {
        return Err(ConfigError::InvalidRange(
            "the search space needs at least 1 dimension".to_string(),
        ));
    }
    let options = Options::from_map(&config.options, n_particles)?;
    let bounds = config
        .bounds
        .as_ref()
        .map(|arg| validate_bounds(arg, dimensions))
        .transpose()?;
    let velocity_clamp = config
        .velocity_clamp
        .as_ref()
        .map(validate_velocity_clamp)
        .transpose()?;
    let init_pos = config
        .init_pos
        .as_ref()
        .map(|arg| validate_init_pos(arg, n_particles, dimensions))
        .transpose()?;
    if config.ftol.is_nan() {
        return Err(ConfigError::InvalidRange("ftol must not be NaN".to_string()));
    }
    if config.ftol_iter < 1 {
        return Err(ConfigError::InvalidRange(
            "ftol_iter must be at least 1".to_string(),
        ));
    }
    if config.print_step < 1 {
        return Err(ConfigError::InvalidRange(
            "print_step must be at least 1".to_string(),
        ));
    }
    Ok(ValidatedConfig {
        n_particles,
        dimensions,
        options,
        bounds,
        velocity_clamp,
        init_pos,
        ftol: config.ftol,
        ftol_iter: config.ftol_iter,
        print_step: config.print_step,
    })
}

fn validate_bounds(arg: &Arg, dimensions: usize) -> Result<Bounds, ConfigError> {
    let Arg::Tuple(items) = arg else {
        return Err(ConfigError::Type(format!(
            "bounds must be a (min_bound, max_bound) tuple, got a {}",
            arg.kind()
        )));
    };
    if items.len() != 2 {
        return Err(ConfigError::Shape(format!(
            "bounds must contain exactly 2 elements (min_bound, max_bound), got {}",
            items.len()
        )));
    }
    let lower = bound_sequence(&items[0], "min_bound", dimensions)?;
    let upper = bound_sequence(&items[1], "max_bound", dimensions)?;
    lower
        .into_iter()
        .zip(upper)
        .enumerate()
        .map(|(d, (lb, ub))| {
            if !(lb.is_finite() && ub.is_finite()) {
                Err(ConfigError::InvalidRange(format!(
                    "bounds must be finite, got ({}, {}) in dimension {}",
                    lb, ub, d
                )))
            } else if lb < ub {
                Ok(Bound::new(lb, ub))
            } else {
                Err(ConfigError::InvalidRange(format!(
                    "max bound {} is not greater than min bound {} in dimension {}",
                    ub, lb, d
                )))
            }
        })
        .collect::<Result<Vec<Bound>, ConfigError>>()
        .map(Bounds::from)
}

fn bound_sequence(arg: &Arg, name: &str, dimensions: usize) -> Result<Vec<Float>, ConfigError> {
    if !arg.is_sequence() {
        return Err(ConfigError::Shape(format!(
            "{} must have one entry per dimension ({}), got a scalar",
            name, dimensions
        )));
    }
    let values = arg.to_flat_vec().ok_or_else(|| {
        ConfigError::Type(format!(
            "{} must be a one-dimensional sequence of numbers, got {}",
            name, arg
        ))
    })?;
    if values.len() != dimensions {
        return Err(ConfigError::Shape(format!(
            "{} has {} entries but the search space has {} dimensions",
            name,
            values.len(),
            dimensions
        )));
    }
    Ok(values)
}

fn validate_velocity_clamp(arg: &Arg) -> Result<Bound, ConfigError> {
    let Arg::Tuple(items) = arg else {
        return Err(ConfigError::Type(format!(
            "velocity_clamp must be a (min_velocity, max_velocity) tuple, got a {}",
            arg.kind()
        )));
    };
    if items.len() != 2 {
        return Err(ConfigError::Shape(format!(
            "velocity_clamp must contain exactly 2 elements, got {}",
            items.len()
        )));
    }
    let (Some(min_v), Some(max_v)) = (items[0].as_scalar(), items[1].as_scalar()) else {
        return Err(ConfigError::Type(format!(
            "velocity_clamp entries must be numbers, got {}",
            arg
        )));
    };
    if !(min_v.is_finite() && max_v.is_finite()) {
        return Err(ConfigError::InvalidRange(format!(
            "velocity_clamp must be finite, got ({}, {})",
            min_v, max_v
        )));
    }
    if min_v >= max_v {
        return Err(ConfigError::InvalidRange(format!(
            "max velocity {} is not greater than min velocity {}",
            max_v, min_v
        )));
    }
    Ok(Bound::new(min_v, max_v))
}

fn validate_init_pos(
    arg: &Arg,
    n_particles: usize,
    dimensions: usize,
) -> Result<DMatrix<Float>, ConfigError> {
    let positions = match arg {
        Arg::Scalar(_) | Arg::Tuple(_) => {
            return Err(ConfigError::Type(format!(
                "init_pos must be an array-like list, vector, or matrix, got a {}",
                arg.kind()
            )))
        }
        Arg::Matrix(m) if m.shape() == (1, dimensions) => {
            DMatrix::from_fn(n_particles, dimensions, |_, j| m[(0, j)])
        }
        Arg::Matrix(m) => {
            if m.shape() != (n_particles, dimensions) {
                return Err(ConfigError::Shape(format!(
                    "init_pos has shape ({}, {}) but the swarm has shape ({}, {})",
                    m.nrows(),
                    m.ncols(),
                    n_particles,
                    dimensions
                )));
            }
            m.clone()
        }
        Arg::Vector(_) => flat_positions(arg, n_particles, dimensions)?,
        Arg::List(items) => {
            if items.iter().all(|item| item.as_scalar().is_some()) {
                flat_positions(arg, n_particles, dimensions)?
            } else {
                nested_positions(items, n_particles, dimensions)?
            }
        }
    };
    if positions.iter().any(|x| !x.is_finite()) {
        return Err(ConfigError::InvalidRange(
            "init_pos must only contain finite values".to_string(),
        ));
    }
    Ok(positions)
}

/// A one-dimensional `init_pos` is either every position laid out row by row, or a single
/// position shared by every particle.
fn flat_positions(
    arg: &Arg,
    n_particles: usize,
    dimensions: usize,
) -> Result<DMatrix<Float>, ConfigError> {
    let values = arg.to_flat_vec().ok_or_else(|| {
        ConfigError::Type(format!("init_pos must only contain numbers, got {}", arg))
    })?;
    if values.len() == n_particles * dimensions {
        Ok(DMatrix::from_row_slice(n_particles, dimensions, &values))
    } else if values.len() == dimensions {
        Ok(DMatrix::from_fn(n_particles, dimensions, |_, j| values[j]))
    } else {
        Err(ConfigError::Shape(format!(
            "init_pos has {} values, expected {} (one position) or {} ({} x {})",
            values.len(),
            dimensions,
            n_particles * dimensions,
            n_particles,
            dimensions
        )))
    }
}

fn nested_positions(
    rows: &[Arg],
    n_particles: usize,
    dimensions: usize,
) -> Result<DMatrix<Float>, ConfigError> {
    if rows.len() != n_particles {
        return Err(ConfigError::Shape(format!(
            "init_pos has {} rows but the swarm has {} particles",
            rows.len(),
            n_particles
        )));
    }
    let mut values = Vec::with_capacity(n_particles * dimensions);
    for (i, row) in rows.iter().enumerate() {
        let row_values = row.to_flat_vec().ok_or_else(|| {
            ConfigError::Type(format!(
                "row {} of init_pos must be a sequence of numbers, got {}",
                i, row
            ))
        })?;
        if row_values.len() != dimensions {
            return Err(ConfigError::Shape(format!(
                "row {} of init_pos has {} values but the search space has {} dimensions",
                i,
                row_values.len(),
                dimensions
            )));
        }
        values.extend(row_values);
    }
    Ok(DMatrix::from_row_slice(n_particles, dimensions, &values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{dmatrix, dvector};

    fn config() -> LocalBestConfig {
        LocalBestConfig::new(
            5,
            2,
            [("c1", 0.5), ("c2", 0.7), ("w", 0.5), ("k", 2.0), ("p", 2.0)],
        )
    }

    #[test]
    fn test_defaults_are_valid() {
        let validated = validate(&config()).unwrap();
        assert_eq!(validated.n_particles, 5);
        assert_eq!(validated.ftol, Float::NEG_INFINITY);
        assert_eq!(validated.position_limits(), vec![(-1.0, 1.0); 2]);
        assert_eq!(validated.velocity_limits(), vec![(-0.2, 0.2); 2]);
    }

    #[test]
    fn test_swarm_size_checks() {
        let mut c = config();
        c.n_particles = 1;
        assert!(matches!(validate(&c), Err(ConfigError::InvalidRange(_))));
        let mut c = config();
        c.dimensions = 0;
        assert!(matches!(validate(&c), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_velocity_limits_follow_bounds_and_clamp() {
        let c = config().with_bounds((vec![0.0, -10.0], vec![1.0, 10.0]));
        let validated = validate(&c).unwrap();
        assert_eq!(validated.velocity_limits(), vec![(-0.1, 0.1), (-2.0, 2.0)]);
        let c = c.with_velocity_clamp((-0.5, 0.25));
        let validated = validate(&c).unwrap();
        assert_eq!(validated.velocity_limits(), vec![(-0.5, 0.25); 2]);
    }

    #[test]
    fn test_bounds_rejects_nested_or_infinite_entries() {
        let c = config().with_bounds((vec![vec![0.0], vec![1.0]], vec![1.0, 2.0]));
        assert!(matches!(validate(&c), Err(ConfigError::Type(_))));
        let c = config().with_bounds((vec![Float::NEG_INFINITY, 0.0], vec![1.0, 2.0]));
        assert!(matches!(validate(&c), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_velocity_clamp_entries_must_be_scalars() {
        let c = config().with_velocity_clamp((vec![1.0], 3.0));
        assert!(matches!(validate(&c), Err(ConfigError::Type(_))));
    }

    #[test]
    fn test_init_pos_shapes() {
        let flat: Vec<Float> = (0..10).map(|i| i as Float).collect();
        let validated = validate(&config().with_init_pos(flat)).unwrap();
        let init_pos = validated.init_pos.unwrap();
        assert_eq!(init_pos.shape(), (5, 2));
        assert_eq!(init_pos[(1, 0)], 2.0);
        assert_eq!(init_pos[(1, 1)], 3.0);

        let validated = validate(&config().with_init_pos(dvector![0.5, -0.5])).unwrap();
        let init_pos = validated.init_pos.unwrap();
        assert!(init_pos.row_iter().all(|row| row[0] == 0.5 && row[1] == -0.5));

        let rows = vec![vec![0.0, 1.0]; 5];
        assert!(validate(&config().with_init_pos(rows)).is_ok());

        let rows = vec![vec![0.0, 1.0]; 4];
        assert!(matches!(
            validate(&config().with_init_pos(rows)),
            Err(ConfigError::Shape(_))
        ));

        let validated = validate(&config().with_init_pos(dmatrix![0.5, -0.5])).unwrap();
        let init_pos = validated.init_pos.unwrap();
        assert_eq!(init_pos.shape(), (5, 2));
        assert!(init_pos.row_iter().all(|row| row[0] == 0.5 && row[1] == -0.5));

        let m = dmatrix![0.0, 1.0; 2.0, 3.0];
        assert!(matches!(
            validate(&config().with_init_pos(m)),
            Err(ConfigError::Shape(_))
        ));

        assert!(matches!(
            validate(&config().with_init_pos(2.0)),
            Err(ConfigError::Type(_))
        ));
    }

    #[test]
    fn test_convergence_settings() {
        assert!(matches!(
            validate(&config().with_ftol(Float::NAN)),
            Err(ConfigError::InvalidRange(_))
        ));
        assert!(matches!(
            validate(&config().with_ftol_iter(0)),
            Err(ConfigError::InvalidRange(_))
        ));
        assert!(matches!(
            validate(&config().with_print_step(0)),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_options_are_checked_before_bounds() {
        let mut c = config().with_bounds(vec![1.0, 2.0]);
        c.options.remove("k");
        assert!(matches!(
            validate(&c),
            Err(ConfigError::MissingOption { .. })
        ));
    }
}
