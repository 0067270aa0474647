// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Derivative Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-point spatial derivatives supplied by the surrogate.
//!
//! Indexed `[total_order][num_y]`. A 1D table has a single entry per order
//! (`num_y = 0`); a 2D table has `total_order + 1` entries per order.

use crate::sub_index::{SpatialDerivative, SubIndexUniverse};
use ndarray::{Array1, ArrayView1, ArrayViewMut1};
use pde_types::error::{PdeError, PdeResult};

#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeTable {
    n_points: usize,
    orders: Vec<Vec<Array1<f64>>>,
}

impl DerivativeTable {
    /// Build from `orders[total_order][num_y]`; all vectors must share one length.
    pub fn from_orders(orders: Vec<Vec<Array1<f64>>>) -> PdeResult<Self> {
        let Some(first) = orders.first().and_then(|row| row.first()) else {
            return Err(PdeError::ShapeMismatch(
                "derivative table has no zeroth-order entry".to_string(),
            ));
        };
        let n_points = first.len();

        for (order, row) in orders.iter().enumerate() {
            if row.is_empty() || row.len() > order + 1 {
                return Err(PdeError::ShapeMismatch(format!(
                    "derivative order {order} has {} entries, expected 1..={}",
                    row.len(),
                    order + 1
                )));
            }
            for (num_y, values) in row.iter().enumerate() {
                if values.len() != n_points {
                    return Err(PdeError::ShapeMismatch(format!(
                        "derivative [{order}][{num_y}] has {} points, expected {n_points}",
                        values.len()
                    )));
                }
            }
        }
        Ok(Self { n_points, orders })
    }

    /// 1D table: `orders[k]` is D_x^k u.
    pub fn from_1d(orders: Vec<Array1<f64>>) -> PdeResult<Self> {
        Self::from_orders(orders.into_iter().map(|v| vec![v]).collect())
    }

    /// Same layout, every entry zero. Used to accumulate gradients.
    pub fn zeros_like(other: &Self) -> Self {
        Self {
            n_points: other.n_points,
            orders: other
                .orders
                .iter()
                .map(|row| row.iter().map(|v| Array1::zeros(v.len())).collect())
                .collect(),
        }
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn highest_order(&self) -> usize {
        self.orders.len() - 1
    }

    pub fn get(&self, derivative: SpatialDerivative) -> PdeResult<ArrayView1<'_, f64>> {
        self.orders
            .get(derivative.total_order())
            .and_then(|row| row.get(derivative.y))
            .map(|v| v.view())
            .ok_or_else(|| missing(derivative))
    }

    pub fn get_mut(&mut self, derivative: SpatialDerivative) -> PdeResult<ArrayViewMut1<'_, f64>> {
        self.orders
            .get_mut(derivative.total_order())
            .and_then(|row| row.get_mut(derivative.y))
            .map(|v| v.view_mut())
            .ok_or_else(|| missing(derivative))
    }

    /// Fails unless every descriptor of `universe` has an entry.
    pub fn covers(&self, universe: &SubIndexUniverse) -> PdeResult<()> {
        for (_, derivative) in universe.iter() {
            self.get(derivative)?;
        }
        Ok(())
    }
}

fn missing(derivative: SpatialDerivative) -> PdeError {
    PdeError::ShapeMismatch(format!(
        "derivative table lacks D_x^{} D_y^{}",
        derivative.x, derivative.y
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use pde_types::state::SpatialDimensions;

    #[test]
    fn test_1d_lookup() {
        let table = DerivativeTable::from_1d(vec![
            array![1.0, 2.0],
            array![3.0, 4.0],
            array![5.0, 6.0],
        ])
        .unwrap();
        assert_eq!(table.n_points(), 2);
        assert_eq!(table.highest_order(), 2);
        assert_eq!(table.get(SpatialDerivative::x_only(1)).unwrap(), array![3.0, 4.0]);
        assert!(table.get(SpatialDerivative::new(0, 1)).is_err());
        assert!(table.get(SpatialDerivative::x_only(3)).is_err());
    }

    #[test]
    fn test_2d_lookup_by_num_y() {
        let table = DerivativeTable::from_orders(vec![
            vec![array![0.0]],
            vec![array![10.0], array![11.0]],
        ])
        .unwrap();
        // D_x u lives at [1][0], D_y u at [1][1].
        assert_eq!(table.get(SpatialDerivative::new(1, 0)).unwrap()[0], 10.0);
        assert_eq!(table.get(SpatialDerivative::new(0, 1)).unwrap()[0], 11.0);
    }

    #[test]
    fn test_rejects_ragged_lengths() {
        let err = DerivativeTable::from_1d(vec![array![1.0, 2.0], array![3.0]]).unwrap_err();
        match err {
            PdeError::ShapeMismatch(msg) => assert!(msg.contains("[1][0]")),
            other => panic!("Expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_overfull_order() {
        let err = DerivativeTable::from_orders(vec![vec![array![1.0], array![2.0]]]).unwrap_err();
        assert!(matches!(err, PdeError::ShapeMismatch(_)));
        assert!(DerivativeTable::from_orders(Vec::new()).is_err());
    }

    #[test]
    fn test_covers_universe() {
        let table = DerivativeTable::from_orders(vec![
            vec![array![0.0]],
            vec![array![1.0], array![2.0]],
        ])
        .unwrap();
        assert!(table
            .covers(&SubIndexUniverse::new(SpatialDimensions::Two, 1))
            .is_ok());
        assert!(table
            .covers(&SubIndexUniverse::new(SpatialDimensions::Two, 2))
            .is_err());
        // A 1D universe only needs the num_y = 0 column.
        assert!(table
            .covers(&SubIndexUniverse::new(SpatialDimensions::One, 1))
            .is_ok());
    }

    #[test]
    fn test_zeros_like_and_get_mut() {
        let table = DerivativeTable::from_1d(vec![array![1.0, 1.0], array![2.0, 2.0]]).unwrap();
        let mut grad = DerivativeTable::zeros_like(&table);
        grad.get_mut(SpatialDerivative::x_only(1)).unwrap()[1] += 0.5;
        assert_eq!(grad.get(SpatialDerivative::x_only(1)).unwrap(), array![0.0, 0.5]);
        assert_eq!(grad.get(SpatialDerivative::x_only(0)).unwrap(), array![0.0, 0.0]);
    }
}
