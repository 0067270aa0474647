// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Sub-Index Universe
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Elementary derivative descriptors and their integer labels.
//!
//! 1D: value v is the x-derivative of order v.
//! 2D: pairs (i, j) with i + j <= H, ordered by total order, then by i.

use pde_types::error::{PdeError, PdeResult};
use pde_types::state::SpatialDimensions;

/// Partial derivative D_x^x D_y^y of the field. 1D descriptors have `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpatialDerivative {
    pub x: usize,
    pub y: usize,
}

impl SpatialDerivative {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn x_only(order: usize) -> Self {
        Self { x: order, y: 0 }
    }

    pub fn total_order(&self) -> usize {
        self.x + self.y
    }
}

/// Sub-index count for one spatial variable.
pub fn num_sub_index_values_1d(highest_order: usize) -> usize {
    highest_order + 1
}

/// Sub-index count for two spatial variables: pairs with i + j <= H.
pub fn num_sub_index_values_2d(highest_order: usize) -> usize {
    (highest_order + 1) * (highest_order + 2) / 2
}

/// Two-way map between sub-index values and derivative descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubIndexUniverse {
    dimensions: SpatialDimensions,
    highest_order: usize,
    descriptors: Vec<SpatialDerivative>,
}

impl SubIndexUniverse {
    pub fn new(dimensions: SpatialDimensions, highest_order: usize) -> Self {
        let descriptors = match dimensions {
            SpatialDimensions::One => (0..=highest_order)
                .map(SpatialDerivative::x_only)
                .collect(),
            SpatialDimensions::Two => {
                let mut out = Vec::with_capacity(num_sub_index_values_2d(highest_order));
                for total in 0..=highest_order {
                    for x in 0..=total {
                        out.push(SpatialDerivative::new(x, total - x));
                    }
                }
                out
            }
        };
        Self {
            dimensions,
            highest_order,
            descriptors,
        }
    }

    pub fn dimensions(&self) -> SpatialDimensions {
        self.dimensions
    }

    pub fn highest_order(&self) -> usize {
        self.highest_order
    }

    /// V, the number of sub-index values.
    pub fn num_values(&self) -> usize {
        self.descriptors.len()
    }

    pub fn descriptor(&self, value: usize) -> PdeResult<SpatialDerivative> {
        self.descriptors
            .get(value)
            .copied()
            .ok_or(PdeError::SubIndexOutOfRange {
                value,
                num_values: self.num_values(),
            })
    }

    /// Inverse of [`descriptor`](Self::descriptor).
    pub fn value_of(&self, derivative: SpatialDerivative) -> PdeResult<usize> {
        let total = derivative.total_order();
        let outside = || {
            PdeError::Precondition(format!(
                "derivative D_x^{} D_y^{} is outside the {}D universe with H={}",
                derivative.x,
                derivative.y,
                self.dimensions.count(),
                self.highest_order
            ))
        };
        if total > self.highest_order {
            return Err(outside());
        }
        match self.dimensions {
            SpatialDimensions::One if derivative.y == 0 => Ok(derivative.x),
            SpatialDimensions::One => Err(outside()),
            SpatialDimensions::Two => Ok(total * (total + 1) / 2 + derivative.x),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, SpatialDerivative)> + '_ {
        self.descriptors.iter().copied().enumerate()
    }
}
