// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Property-Based Tests (proptest) for pde-train
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for pde-train using proptest.
//!
//! Covers: optimizer descent on quadratics, inferred bounds containment,
//! noise determinism under a fixed seed, library sizing from config.

use ndarray::{Array1, Array2};
use pde_math::combinatorics::total_indices;
use pde_train::dataset::{bounds_from_points, DataSet};
use pde_train::optimizer::{Adam, GradientDescent, Optimizer};
use pde_train::trainer::CoefficientTrainer;
use pde_types::config::{
    CheckpointConfig, CollocationSampler, DiscoveryConfig, OptimizerConfig, OptimizerKind,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn quadratic(x: &Array1<f64>, target: &Array1<f64>) -> f64 {
    (x - target).mapv(|d| d * d).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn gradient_descent_never_increases_quadratic(
        target in prop::collection::vec(-5.0f64..5.0, 1..8),
        lr in 0.01f64..0.45,
    ) {
        let target = Array1::from_vec(target);
        let mut x = Array1::zeros(target.len());
        let mut gd = GradientDescent::new(lr);
        let mut prev = quadratic(&x, &target);
        for _ in 0..20 {
            let grad = (&x - &target) * 2.0;
            gd.step(&mut x, &grad).unwrap();
            let cur = quadratic(&x, &target);
            prop_assert!(cur <= prev + 1e-12);
            prev = cur;
        }
    }

    #[test]
    fn adam_step_is_bounded_by_learning_rate(
        grad in prop::collection::vec(-100.0f64..100.0, 1..8),
        lr in 1e-4f64..0.5,
    ) {
        let grad = Array1::from_vec(grad);
        let mut x = Array1::zeros(grad.len());
        let mut adam = Adam::new(lr);
        adam.step(&mut x, &grad).unwrap();
        for v in x.iter() {
            prop_assert!(v.abs() <= lr * (1.0 + 1e-9));
        }
    }

    #[test]
    fn inferred_bounds_contain_every_point(
        rows in prop::collection::vec(prop::collection::vec(-50.0f64..50.0, 3), 1..40),
    ) {
        let n = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let points = Array2::from_shape_vec((n, 3), flat).unwrap();
        let bounds = bounds_from_points(&points).unwrap();
        for row in points.outer_iter() {
            prop_assert!(bounds.contains(&row.to_vec()));
        }
    }

    #[test]
    fn noise_is_reproducible_under_seed(seed in any::<u64>(), proportion in 0.0f64..1.0) {
        let points = Array2::from_shape_fn((16, 2), |(i, j)| (i + j) as f64 / 16.0);
        let values = Array1::from_shape_fn(16, |i| (i as f64).sin());
        let bounds = bounds_from_points(&points).unwrap();
        let set = DataSet::new(points.clone(), values.clone(), points, values, bounds).unwrap();

        let a = set.clone().with_noise(proportion, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = set.with_noise(proportion, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn trainer_library_matches_closed_form(dims in 1usize..=2, h in 0usize..=3, d in 0usize..=3) {
        let config = DiscoveryConfig {
            num_spatial_dimensions: dims,
            highest_order_derivatives: h,
            maximum_term_degree: d,
            p: 0.1,
            lambda: 1e-4,
            optimizer: OptimizerConfig { kind: OptimizerKind::Adam, learning_rate: 1e-3 },
            num_epochs: 1,
            num_train_coll_points: 1,
            num_test_coll_points: 1,
            sampler: CollocationSampler::Uniform,
            report_interval: 1,
            seed: None,
            checkpoint: CheckpointConfig::default(),
        };
        let trainer = CoefficientTrainer::from_config(config).unwrap();
        let v = if dims == 1 { h + 1 } else { (h + 1) * (h + 2) / 2 };
        prop_assert_eq!(trainer.columns().len(), total_indices(v, d).unwrap());
        prop_assert_eq!(trainer.xi().len(), trainer.columns().len() + 1);
    }
}
