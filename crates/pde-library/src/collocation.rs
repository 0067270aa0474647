// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Term Evaluator / Collocation Loss
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Library reconstruction of D_t u and its mean-square residual.
//!
//! reconstruction = Σ_i Xi[i] Π_{v ∈ m_i} D_v u + Xi[T] · 1
//! loss           = mean((reconstruction − D_t u)²)
//!
//! Columns are accumulated in ascending order, then the offset, so results
//! are bit-reproducible for a fixed input.

use crate::derivatives::DerivativeTable;
use crate::multi_index::{ColumnTable, MultiIndex};
use crate::sub_index::SubIndexUniverse;
use ndarray::{Array1, Array2, ArrayView1};
use pde_types::error::{PdeError, PdeResult};

/// Loss, residual and gradients of one collocation evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct CollocationGradient {
    pub loss: f64,
    /// reconstruction − D_t u
    pub residual: Array1<f64>,
    /// ∂L/∂Xi, length T + 1.
    pub xi: Array1<f64>,
    /// ∂L/∂(D_t u)
    pub dt: Array1<f64>,
    /// ∂L/∂(D_v u) for every table entry; entries no term uses stay zero.
    pub table: DerivativeTable,
}

/// Product of the derivative vectors named by `multi_index`; all ones when empty.
pub fn library_term(
    multi_index: &MultiIndex,
    universe: &SubIndexUniverse,
    table: &DerivativeTable,
) -> PdeResult<Array1<f64>> {
    let mut term = Array1::ones(table.n_points());
    for &value in multi_index.values() {
        let derivative = universe.descriptor(value)?;
        term *= &table.get(derivative)?;
    }
    Ok(term)
}

/// Σ_i Xi[i] Θ_i + Xi[T].
pub fn reconstruct_time_derivative(
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
    xi: &Array1<f64>,
) -> PdeResult<Array1<f64>> {
    check_library(table, universe, columns, xi)?;
    accumulate(table, universe, columns, xi)
}

/// Mean-square residual between the library reconstruction and `dt`.
pub fn collocation_loss(
    dt: ArrayView1<'_, f64>,
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
    xi: &Array1<f64>,
) -> PdeResult<f64> {
    check_time_derivative(dt, table)?;
    let reconstruction = reconstruct_time_derivative(table, universe, columns, xi)?;
    let residual = reconstruction - &dt;
    Ok(residual.mapv(|r| r * r).mean().unwrap_or(0.0))
}

/// Loss together with its gradients w.r.t. Xi, D_t u and every derivative
/// vector, for chaining into an external autodiff engine.
pub fn collocation_loss_with_gradient(
    dt: ArrayView1<'_, f64>,
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
    xi: &Array1<f64>,
) -> PdeResult<CollocationGradient> {
    check_time_derivative(dt, table)?;
    check_library(table, universe, columns, xi)?;

    let n = table.n_points() as f64;
    let residual = accumulate(table, universe, columns, xi)? - &dt;
    let loss = residual.mapv(|r| r * r).mean().unwrap_or(0.0);
    let d_residual = &residual * (2.0 / n);

    let total = columns.len();
    let mut xi_grad = Array1::zeros(total + 1);
    let mut table_grad = DerivativeTable::zeros_like(table);

    for (column, multi_index) in columns.iter() {
        let term = library_term(multi_index, universe, table)?;
        xi_grad[column] = d_residual.dot(&term);

        let coefficient = xi[column];
        if coefficient == 0.0 {
            continue;
        }
        let weight = &d_residual * coefficient;
        let values = multi_index.values();
        for skip in 0..values.len() {
            let mut partial = weight.clone();
            for (k, &value) in values.iter().enumerate() {
                if k != skip {
                    partial *= &table.get(universe.descriptor(value)?)?;
                }
            }
            let target = universe.descriptor(values[skip])?;
            let mut slot = table_grad.get_mut(target)?;
            slot += &partial;
        }
    }
    xi_grad[total] = d_residual.sum();

    Ok(CollocationGradient {
        loss,
        dt: -&d_residual,
        residual,
        xi: xi_grad,
        table: table_grad,
    })
}

/// Design matrix Θ of shape (N, T + 1); the last column is all ones.
pub fn library_matrix(
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
) -> PdeResult<Array2<f64>> {
    check_universe(table, universe, columns)?;
    let mut theta = Array2::ones((table.n_points(), columns.len() + 1));
    for (column, multi_index) in columns.iter() {
        let term = library_term(multi_index, universe, table)?;
        theta.column_mut(column).assign(&term);
    }
    Ok(theta)
}

fn accumulate(
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
    xi: &Array1<f64>,
) -> PdeResult<Array1<f64>> {
    let mut reconstruction = Array1::zeros(table.n_points());
    for (column, multi_index) in columns.iter() {
        let term = library_term(multi_index, universe, table)?;
        reconstruction.scaled_add(xi[column], &term);
    }
    reconstruction += xi[columns.len()];
    Ok(reconstruction)
}

fn check_time_derivative(dt: ArrayView1<'_, f64>, table: &DerivativeTable) -> PdeResult<()> {
    if dt.len() != table.n_points() {
        return Err(PdeError::ShapeMismatch(format!(
            "time derivative has {} points, derivative table has {}",
            dt.len(),
            table.n_points()
        )));
    }
    Ok(())
}

fn check_universe(
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
) -> PdeResult<()> {
    if table.n_points() == 0 {
        return Err(PdeError::ShapeMismatch(
            "collocation requires at least one point".to_string(),
        ));
    }
    let enumerator = columns.enumerator();
    if enumerator.num_values() != universe.num_values() {
        return Err(PdeError::ShapeMismatch(format!(
            "column table built for {} sub-index values, universe has {}",
            enumerator.num_values(),
            universe.num_values()
        )));
    }
    if enumerator.max_degree() > 0 {
        table.covers(universe)?;
    }
    Ok(())
}

fn check_library(
    table: &DerivativeTable,
    universe: &SubIndexUniverse,
    columns: &ColumnTable,
    xi: &Array1<f64>,
) -> PdeResult<()> {
    check_universe(table, universe, columns)?;
    if xi.len() != columns.len() + 1 {
        return Err(PdeError::ShapeMismatch(format!(
            "Xi has {} components, expected {} library terms + 1 offset",
            xi.len(),
            columns.len()
        )));
    }
    Ok(())
}
