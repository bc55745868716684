use fastrand::Rng;
use lbpso::prelude::*;
use lbpso::test_functions::Sphere;
use nalgebra::{dmatrix, dvector};

fn options() -> [(&'static str, Float); 5] {
    [("c1", 0.5), ("c2", 0.7), ("w", 0.5), ("k", 2.0), ("p", 2.0)]
}

fn build(config: LocalBestConfig) -> Result<LocalBestPSO, ConfigError> {
    LocalBestPSO::new(config, Rng::with_seed(0))
}

fn config() -> LocalBestConfig {
    LocalBestConfig::new(5, 2, options())
}

#[test]
fn test_missing_option_is_reported() {
    for missing in ["c1", "c2", "w", "k", "p"] {
        let partial: Vec<(&str, Float)> = options()
            .into_iter()
            .filter(|(key, _)| *key != missing)
            .collect();
        let result = build(LocalBestConfig::new(5, 2, partial.into_iter().collect::<OptionMap>()));
        assert_eq!(
            result.err(),
            Some(ConfigError::MissingOption {
                keys: vec![missing.to_string()]
            })
        );
    }
}

#[test]
fn test_invalid_k_or_p_values() {
    for (key, value) in [("k", -1.0), ("k", 6.0), ("p", 5.0)] {
        let mut c = config();
        c.options.insert(key, value);
        assert!(matches!(build(c), Err(ConfigError::InvalidRange(_))));
    }
    assert!(build(config()).is_ok());
}

#[test]
fn test_bounds_size_exception() {
    let cases: Vec<Arg> = vec![
        (-5.0, -5.0).into(),
        (dvector![-5.0, -5.0, -5.0], dvector![5.0, 5.0]).into(),
        (dvector![-5.0, -5.0, -5.0], dvector![5.0, 5.0, 5.0]).into(),
    ];
    for bounds in cases {
        assert!(matches!(
            build(config().with_bounds(bounds)),
            Err(ConfigError::Shape(_))
        ));
    }
}

#[test]
fn test_bounds_maxmin_exception() {
    for bounds in [
        (dvector![5.0, 5.0], dvector![-5.0, -5.0]),
        (dvector![5.0, -5.0], dvector![-5.0, 5.0]),
    ] {
        assert!(matches!(
            build(config().with_bounds(bounds)),
            Err(ConfigError::InvalidRange(_))
        ));
    }
}

#[test]
fn test_bound_type_exception() {
    let cases: Vec<Arg> = vec![
        vec![dvector![-5.0, -5.0], dvector![5.0, 5.0]].into(),
        dmatrix![-5.0, -5.0; 5.0, 5.0].into(),
    ];
    for bounds in cases {
        assert!(matches!(
            build(config().with_bounds(bounds)),
            Err(ConfigError::Type(_))
        ));
    }
}

#[test]
fn test_vclamp_type_exception() {
    let cases: Vec<Arg> = vec![vec![1.0, 3.0].into(), dvector![1.0, 3.0].into()];
    for velocity_clamp in cases {
        assert!(matches!(
            build(config().with_velocity_clamp(velocity_clamp)),
            Err(ConfigError::Type(_))
        ));
    }
}

#[test]
fn test_vclamp_shape_exception() {
    for velocity_clamp in [(1.0, 1.0, 1.0), (2.0, 3.0, 1.0)] {
        assert!(matches!(
            build(config().with_velocity_clamp(velocity_clamp)),
            Err(ConfigError::Shape(_))
        ));
    }
}

#[test]
fn test_vclamp_maxmin_exception() {
    for velocity_clamp in [(3.0, 2.0), (10.0, 8.0)] {
        assert!(matches!(
            build(config().with_velocity_clamp(velocity_clamp)),
            Err(ConfigError::InvalidRange(_))
        ));
    }
}

#[test]
fn test_init_pos_exception() {
    assert!(matches!(
        build(config().with_init_pos(vec![1.5, 3.2, 2.5])),
        Err(ConfigError::Shape(_))
    ));
    assert!(matches!(
        build(config().with_init_pos((0.1, 1.5))),
        Err(ConfigError::Type(_))
    ));
}

#[test]
fn test_reset_default_values() {
    let mut pso = build(LocalBestConfig::new(10, 2, options())).unwrap();
    pso.optimize(&Sphere, 10, false).unwrap();
    assert!(pso.best_cost().is_finite());
    pso.reset();
    assert_eq!(pso.best_cost(), Float::INFINITY);
    assert!(pso.best_pos().is_none());
}

#[test]
fn test_training_history_shape() {
    let mut pso = build(LocalBestConfig::new(10, 2, options())).unwrap();
    pso.optimize(&Sphere, 1000, false).unwrap();
    assert_eq!(pso.cost_history().len(), 1000);
    assert_eq!(pso.mean_pbest_history().len(), 1000);
    assert_eq!(pso.mean_neighbor_history().len(), 1000);
    assert_eq!(pso.pos_history().len(), 1000);
    assert_eq!(pso.velocity_history().len(), 1000);
    assert!(pso.pos_history().iter().all(|x| x.shape() == (10, 2)));
    assert!(pso.velocity_history().iter().all(|v| v.shape() == (10, 2)));
}

#[test]
fn test_ftol_effect() {
    let mut pso = build(LocalBestConfig::new(10, 2, options()).with_ftol(1e-1)).unwrap();
    pso.optimize(&Sphere, 2000, false).unwrap();
    assert_ne!(pso.cost_history().len(), 2000);
}

#[test]
fn test_identical_seeds_give_identical_runs() {
    let run = || {
        let mut pso = build(
            LocalBestConfig::new(10, 3, options())
                .with_bounds((vec![-2.0, -2.0, -2.0], vec![2.0, 2.0, 2.0])),
        )
        .unwrap();
        let result = pso.optimize(&Sphere, 100, false).unwrap();
        (result, pso.pos_history().to_vec())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_closure_objective_with_init_pos() {
    let init_pos = dmatrix![
        3.0, 3.0;
        3.5, 3.0;
        3.0, 3.5;
        4.0, 4.0;
        3.2, 3.7
    ];
    let mut pso = build(config().with_init_pos(init_pos.clone())).unwrap();
    assert_eq!(pso.swarm().position, init_pos);
    let shifted = |x: &DMatrix<Float>| {
        DVector::from_iterator(
            x.nrows(),
            x.row_iter().map(|row| (row[0] - 3.0).powi(2) + (row[1] - 3.0).powi(2)),
        )
    };
    let (best_cost, best_pos) = pso.optimize(&shifted, 1, false).unwrap();
    assert_eq!(best_cost, 0.0);
    assert_eq!(best_pos, Some(dvector![3.0, 3.0]));
}
