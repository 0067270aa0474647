// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{PdeError, PdeResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Number of spatial variables of the observed field: u(t, x) or u(t, x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialDimensions {
    One,
    Two,
}

impl SpatialDimensions {
    pub fn count(self) -> usize {
        match self {
            SpatialDimensions::One => 1,
            SpatialDimensions::Two => 2,
        }
    }

    /// Surrogate input width: time plus the spatial coordinates.
    pub fn input_dim(self) -> usize {
        self.count() + 1
    }
}

impl TryFrom<usize> for SpatialDimensions {
    type Error = PdeError;

    fn try_from(value: usize) -> PdeResult<Self> {
        match value {
            1 => Ok(SpatialDimensions::One),
            2 => Ok(SpatialDimensions::Two),
            other => Err(PdeError::UnsupportedDimension(other)),
        }
    }
}

/// Fresh coefficient vector: one weight per library column plus the constant offset.
pub fn zero_coefficients(total_indices: usize) -> Array1<f64> {
    Array1::zeros(total_indices + 1)
}

/// Loss components from one evaluation pass.
///
/// `sparsity` is already scaled by lambda, so `total` is the plain sum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LossBreakdown {
    pub data: f64,
    pub collocation: f64,
    pub sparsity: f64,
    pub total: f64,
}

impl LossBreakdown {
    pub fn new(data: f64, collocation: f64, sparsity: f64) -> Self {
        LossBreakdown {
            data,
            collocation,
            sparsity,
            total: data + collocation + sparsity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.data.is_finite()
            && self.collocation.is_finite()
            && self.sparsity.is_finite()
            && self.total.is_finite()
    }
}

/// Losses recorded on a reporting epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    pub epoch: usize,
    pub train: LossBreakdown,
    pub test: LossBreakdown,
}
