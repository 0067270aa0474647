// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Losses
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar losses handed to the training loop: collocation, data and Lp.

use crate::collocation::collocation_loss;
use crate::multi_index::ColumnTable;
use crate::sub_index::SubIndexUniverse;
use crate::surrogate::Surrogate;
use ndarray::{Array1, ArrayView1, ArrayView2};
use pde_types::error::{PdeError, PdeResult};

/// Collocation loss of `surrogate` at `coll_points` under coefficients `xi`.
pub fn coll_loss<S: Surrogate + ?Sized>(
    surrogate: &S,
    xi: &Array1<f64>,
    coll_points: ArrayView2<'_, f64>,
    highest_order: usize,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
) -> PdeResult<f64> {
    check_surrogate_dims(surrogate, universe)?;
    let derivs = surrogate.derivatives(coll_points, highest_order)?;
    collocation_loss(derivs.dt.view(), &derivs.table, universe, columns, xi)
}

/// Mean-square error of the surrogate against observed values.
pub fn data_loss<S: Surrogate + ?Sized>(
    surrogate: &S,
    data_points: ArrayView2<'_, f64>,
    data_values: ArrayView1<'_, f64>,
) -> PdeResult<f64> {
    let predictions = surrogate.evaluate(data_points)?;
    mean_squared_error(predictions.view(), data_values)
}

pub fn mean_squared_error(
    predictions: ArrayView1<'_, f64>,
    observations: ArrayView1<'_, f64>,
) -> PdeResult<f64> {
    if predictions.len() != observations.len() {
        return Err(PdeError::ShapeMismatch(format!(
            "{} predictions for {} observations",
            predictions.len(),
            observations.len()
        )));
    }
    if predictions.is_empty() {
        return Err(PdeError::ShapeMismatch(
            "mean squared error of zero samples".to_string(),
        ));
    }
    let sum: f64 = predictions
        .iter()
        .zip(observations.iter())
        .map(|(p, o)| (p - o) * (p - o))
        .sum();
    Ok(sum / predictions.len() as f64)
}

/// (Σ|Xi_i|^p)^(1/p). A quasinorm for 0 < p < 1: no triangle inequality.
pub fn lp_loss(xi: &Array1<f64>, p: f64) -> PdeResult<f64> {
    check_exponent(p)?;
    let sum: f64 = xi.iter().map(|v| v.abs().powf(p)).sum();
    Ok(sum.powf(1.0 / p))
}

/// Gradient of [`lp_loss`]. Zero components and the zero vector get 0.
pub fn lp_loss_gradient(xi: &Array1<f64>, p: f64) -> PdeResult<Array1<f64>> {
    check_exponent(p)?;
    let sum: f64 = xi.iter().map(|v| v.abs().powf(p)).sum();
    if sum == 0.0 {
        return Ok(Array1::zeros(xi.len()));
    }
    let outer = sum.powf(1.0 / p - 1.0);
    Ok(xi.mapv(|v| {
        if v == 0.0 {
            0.0
        } else {
            outer * v.abs().powf(p - 1.0) * v.signum()
        }
    }))
}

fn check_exponent(p: f64) -> PdeResult<()> {
    if !(p.is_finite() && p > 0.0) {
        return Err(PdeError::Precondition(format!(
            "Lp exponent must be positive and finite, got {p}"
        )));
    }
    Ok(())
}

fn check_surrogate_dims<S: Surrogate + ?Sized>(
    surrogate: &S,
    universe: &SubIndexUniverse,
) -> PdeResult<()> {
    let expected = universe.dimensions().input_dim();
    if surrogate.input_dim() != expected {
        return Err(PdeError::ShapeMismatch(format!(
            "surrogate takes {} coordinates, library expects {expected}",
            surrogate.input_dim()
        )));
    }
    Ok(())
}
