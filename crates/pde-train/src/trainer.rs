// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Coefficient Trainer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sparse regression of Xi against a fixed surrogate.
//!
//! Per epoch: draw fresh collocation points, take one optimizer step on
//! `coll + lambda * lp`, and periodically record train/test losses.

use crate::checkpoint::Checkpoint;
use crate::dataset::DataSet;
use crate::optimizer::{build_optimizer, Optimizer};
use ndarray::{Array1, ArrayView1, ArrayView2};
use pde_library::collocation::collocation_loss_with_gradient;
use pde_library::equation::DiscoveredEquation;
use pde_library::loss::{coll_loss, data_loss, lp_loss, lp_loss_gradient};
use pde_library::multi_index::{ColumnTable, MultiIndexEnumerator};
use pde_library::sub_index::SubIndexUniverse;
use pde_library::surrogate::Surrogate;
use pde_math::sampling::sample_points;
use pde_types::config::DiscoveryConfig;
use pde_types::error::{PdeError, PdeResult};
use pde_types::state::{zero_coefficients, EpochRecord, LossBreakdown};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Loss history and final equation of one [`CoefficientTrainer::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub epochs: usize,
    pub history: Vec<EpochRecord>,
    pub xi: Vec<f64>,
    pub equation: String,
}

impl TrainingReport {
    pub fn to_json(&self) -> PdeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn final_record(&self) -> Option<&EpochRecord> {
        self.history.last()
    }
}

/// Seeded from `config.seed` when set, otherwise from OS entropy.
pub fn rng_from_config(config: &DiscoveryConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct CoefficientTrainer {
    config: DiscoveryConfig,
    universe: SubIndexUniverse,
    columns: ColumnTable,
    xi: Array1<f64>,
    optimizer: Box<dyn Optimizer>,
}

impl CoefficientTrainer {
    pub fn from_config(config: DiscoveryConfig) -> PdeResult<Self> {
        config.validate()?;
        let universe =
            SubIndexUniverse::new(config.spatial_dimensions()?, config.highest_order_derivatives);
        let enumerator =
            MultiIndexEnumerator::new(universe.num_values(), config.maximum_term_degree)?;
        let columns = ColumnTable::build(enumerator)?;
        let mut xi = zero_coefficients(columns.len());
        let mut optimizer = build_optimizer(&config.optimizer);

        let ckpt = &config.checkpoint;
        if ckpt.load_xi || ckpt.load_optimizer {
            let path = ckpt.load_file.as_deref().ok_or_else(|| {
                PdeError::ConfigError("checkpoint load requested without load_file".to_string())
            })?;
            let loaded = Checkpoint::load(path, columns.len())?;
            if ckpt.load_xi {
                xi = loaded.xi;
            }
            if ckpt.load_optimizer {
                let state = loaded.optimizer.ok_or_else(|| {
                    PdeError::Checkpoint(format!(
                        "load_optimizer requested but '{path}' holds no optimizer state"
                    ))
                })?;
                optimizer.load_state(state)?;
            }
            // Configured step size wins over whatever was saved.
            optimizer.set_learning_rate(config.optimizer.learning_rate);
        }

        Ok(Self {
            config,
            universe,
            columns,
            xi,
            optimizer,
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn universe(&self) -> &SubIndexUniverse {
        &self.universe
    }

    pub fn columns(&self) -> &ColumnTable {
        &self.columns
    }

    pub fn xi(&self) -> &Array1<f64> {
        &self.xi
    }

    pub fn set_xi(&mut self, xi: Array1<f64>) -> PdeResult<()> {
        if xi.len() != self.columns.len() + 1 {
            return Err(PdeError::ShapeMismatch(format!(
                "Xi has {} components, library needs {}",
                xi.len(),
                self.columns.len() + 1
            )));
        }
        self.xi = xi;
        Ok(())
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    fn sparsity(&self) -> PdeResult<f64> {
        Ok(self.config.lambda * lp_loss(&self.xi, self.config.p)?)
    }

    /// Losses at the current Xi without changing it.
    pub fn evaluate<S: Surrogate + ?Sized>(
        &self,
        surrogate: &S,
        data_points: ArrayView2<'_, f64>,
        data_values: ArrayView1<'_, f64>,
        coll_points: ArrayView2<'_, f64>,
    ) -> PdeResult<LossBreakdown> {
        let data = data_loss(surrogate, data_points, data_values)?;
        let coll = coll_loss(
            surrogate,
            &self.xi,
            coll_points,
            self.config.highest_order_derivatives,
            &self.universe,
            &self.columns,
        )?;
        Ok(LossBreakdown::new(data, coll, self.sparsity()?))
    }

    /// One optimizer step on `coll + lambda * lp`; returns the losses before
    /// the step.
    pub fn training_step<S: Surrogate + ?Sized>(
        &mut self,
        surrogate: &S,
        data_points: ArrayView2<'_, f64>,
        data_values: ArrayView1<'_, f64>,
        coll_points: ArrayView2<'_, f64>,
    ) -> PdeResult<LossBreakdown> {
        let expected = self.universe.dimensions().input_dim();
        if surrogate.input_dim() != expected {
            return Err(PdeError::ShapeMismatch(format!(
                "surrogate takes {} coordinates, library expects {expected}",
                surrogate.input_dim()
            )));
        }

        let data = data_loss(surrogate, data_points, data_values)?;
        let derivs =
            surrogate.derivatives(coll_points, self.config.highest_order_derivatives)?;
        let coll = collocation_loss_with_gradient(
            derivs.dt.view(),
            &derivs.table,
            &self.universe,
            &self.columns,
            &self.xi,
        )?;
        let sparsity = self.sparsity()?;

        let mut grad = coll.xi;
        if self.config.lambda != 0.0 {
            let lp_grad = lp_loss_gradient(&self.xi, self.config.p)?;
            grad.scaled_add(self.config.lambda, &lp_grad);
        }
        self.optimizer.step(&mut self.xi, &grad)?;

        Ok(LossBreakdown::new(data, coll.loss, sparsity))
    }

    /// Full epoch loop. Saves a checkpoint at the end when configured.
    pub fn run<S, R>(&mut self, surrogate: &S, dataset: &DataSet, rng: &mut R) -> PdeResult<TrainingReport>
    where
        S: Surrogate + ?Sized,
        R: Rng + ?Sized,
    {
        let expected = self.universe.dimensions().input_dim();
        if dataset.input_dim() != expected {
            return Err(PdeError::ShapeMismatch(format!(
                "data set has {} coordinates, library expects {expected}",
                dataset.input_dim()
            )));
        }

        let num_epochs = self.config.num_epochs;
        let interval = self.config.report_interval;
        let mut history = Vec::new();

        for epoch in 0..num_epochs {
            let train_coll = sample_points(
                self.config.sampler,
                &dataset.bounds,
                self.config.num_train_coll_points,
                rng,
            );
            let before = self.training_step(
                surrogate,
                dataset.train_points.view(),
                dataset.train_values.view(),
                train_coll.view(),
            )?;
            if !before.is_finite() {
                return Err(PdeError::Diverged {
                    epoch,
                    message: format!("non-finite training loss {:?}", before),
                });
            }

            if epoch % interval == 0 || epoch + 1 == num_epochs {
                let test_coll = sample_points(
                    self.config.sampler,
                    &dataset.bounds,
                    self.config.num_test_coll_points,
                    rng,
                );
                let train = self.evaluate(
                    surrogate,
                    dataset.train_points.view(),
                    dataset.train_values.view(),
                    train_coll.view(),
                )?;
                let test = self.evaluate(
                    surrogate,
                    dataset.test_points.view(),
                    dataset.test_values.view(),
                    test_coll.view(),
                )?;
                if !(train.is_finite() && test.is_finite()) {
                    return Err(PdeError::Diverged {
                        epoch,
                        message: "non-finite loss after optimizer step".to_string(),
                    });
                }
                history.push(EpochRecord { epoch, train, test });
            }
        }

        if self.config.checkpoint.save_state {
            if let Some(path) = self.config.checkpoint.save_file.clone() {
                self.save_checkpoint(&path)?;
            }
        }

        Ok(TrainingReport {
            epochs: num_epochs,
            history,
            xi: self.xi.to_vec(),
            equation: self.equation()?.to_string(),
        })
    }

    pub fn equation(&self) -> PdeResult<DiscoveredEquation> {
        DiscoveredEquation::from_coefficients(&self.xi, &self.columns, &self.universe)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            xi: self.xi.clone(),
            optimizer: Some(self.optimizer.state()),
        }
    }

    pub fn save_checkpoint(&self, path: &str) -> PdeResult<()> {
        self.checkpoint().save(path)
    }
}
