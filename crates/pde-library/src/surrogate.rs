// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Surrogate Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Differentiable approximation of u(t, x[, y]).
//!
//! The library engine never differentiates anything itself; it only consumes
//! the time derivative and the spatial derivative table a surrogate returns.

use crate::derivatives::DerivativeTable;
use crate::sub_index::SpatialDerivative;
use ndarray::{Array1, ArrayView2};
use pde_types::error::{PdeError, PdeResult};
use pde_types::state::SpatialDimensions;

/// D_t u and the spatial derivative table at a batch of points.
#[derive(Debug, Clone, PartialEq)]
pub struct SurrogateDerivatives {
    pub dt: Array1<f64>,
    pub table: DerivativeTable,
}

pub trait Surrogate {
    /// Coordinates per point: 1 + number of spatial variables.
    fn input_dim(&self) -> usize;

    /// u at each row `(t, x[, y])` of `points`.
    fn evaluate(&self, points: ArrayView2<'_, f64>) -> PdeResult<Array1<f64>>;

    /// D_t u and every spatial derivative with total order `<= highest_order`.
    fn derivatives(
        &self,
        points: ArrayView2<'_, f64>,
        highest_order: usize,
    ) -> PdeResult<SurrogateDerivatives>;
}

type PointFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;
type DerivativeFn = Box<dyn Fn(&[f64], SpatialDerivative) -> f64 + Send + Sync>;

/// Surrogate backed by closed-form closures.
///
/// `spatial` receives the point and the requested derivative; it is never
/// asked for order zero, which comes from `field`.
pub struct FnSurrogate {
    dimensions: SpatialDimensions,
    field: PointFn,
    time_derivative: PointFn,
    spatial: DerivativeFn,
}

impl FnSurrogate {
    pub fn new<U, T, S>(dimensions: SpatialDimensions, field: U, time_derivative: T, spatial: S) -> Self
    where
        U: Fn(&[f64]) -> f64 + Send + Sync + 'static,
        T: Fn(&[f64]) -> f64 + Send + Sync + 'static,
        S: Fn(&[f64], SpatialDerivative) -> f64 + Send + Sync + 'static,
    {
        Self {
            dimensions,
            field: Box::new(field),
            time_derivative: Box::new(time_derivative),
            spatial: Box::new(spatial),
        }
    }

    fn check_points(&self, points: &ArrayView2<'_, f64>) -> PdeResult<()> {
        if points.ncols() != self.input_dim() {
            return Err(PdeError::ShapeMismatch(format!(
                "surrogate expects {} coordinates per point, got {}",
                self.input_dim(),
                points.ncols()
            )));
        }
        Ok(())
    }

    fn map_rows<F: Fn(&[f64]) -> f64>(points: &ArrayView2<'_, f64>, f: F) -> Array1<f64> {
        let mut buf = Vec::with_capacity(points.ncols());
        points
            .outer_iter()
            .map(|row| {
                buf.clear();
                buf.extend(row.iter().copied());
                f(&buf)
            })
            .collect()
    }
}

impl Surrogate for FnSurrogate {
    fn input_dim(&self) -> usize {
        self.dimensions.input_dim()
    }

    fn evaluate(&self, points: ArrayView2<'_, f64>) -> PdeResult<Array1<f64>> {
        self.check_points(&points)?;
        Ok(Self::map_rows(&points, &self.field))
    }

    fn derivatives(
        &self,
        points: ArrayView2<'_, f64>,
        highest_order: usize,
    ) -> PdeResult<SurrogateDerivatives> {
        self.check_points(&points)?;
        let dt = Self::map_rows(&points, &self.time_derivative);

        let mut orders = Vec::with_capacity(highest_order + 1);
        orders.push(vec![Self::map_rows(&points, &self.field)]);
        for total in 1..=highest_order {
            let max_y = match self.dimensions {
                SpatialDimensions::One => 0,
                SpatialDimensions::Two => total,
            };
            let row = (0..=max_y)
                .map(|y| {
                    let d = SpatialDerivative::new(total - y, y);
                    Self::map_rows(&points, |p| (self.spatial)(p, d))
                })
                .collect();
            orders.push(row);
        }

        Ok(SurrogateDerivatives {
            dt,
            table: DerivativeTable::from_orders(orders)?,
        })
    }
}
