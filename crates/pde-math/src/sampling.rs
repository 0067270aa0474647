// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Point Sampling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Collocation point sampling over the (t, x[, y]) problem domain.

use ndarray::Array2;
use pde_types::config::CollocationSampler;
use pde_types::error::{PdeError, PdeResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Axis-aligned box: one `[lower, upper]` pair per coordinate, time first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    ranges: Vec<[f64; 2]>,
}

impl Bounds {
    pub fn new(ranges: Vec<[f64; 2]>) -> PdeResult<Self> {
        if ranges.is_empty() {
            return Err(PdeError::Precondition(
                "bounds require at least one coordinate".to_string(),
            ));
        }
        for (axis, [lo, hi]) in ranges.iter().enumerate() {
            if !(lo.is_finite() && hi.is_finite()) || lo > hi {
                return Err(PdeError::Precondition(format!(
                    "invalid bounds on axis {axis}: [{lo}, {hi}]"
                )));
            }
        }
        Ok(Self { ranges })
    }

    /// Coordinate count, including time.
    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[[f64; 2]] {
        &self.ranges
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dim()
            && point
                .iter()
                .zip(&self.ranges)
                .all(|(v, [lo, hi])| *v >= *lo && *v <= *hi)
    }
}

/// Uniformly distributed points inside `bounds`, shape (n_points, bounds.dim()).
pub fn uniform_points<R: Rng + ?Sized>(bounds: &Bounds, n_points: usize, rng: &mut R) -> Array2<f64> {
    let mut points = Array2::zeros((n_points, bounds.dim()));
    for mut row in points.outer_iter_mut() {
        for (v, [lo, hi]) in row.iter_mut().zip(bounds.ranges()) {
            *v = lo + (hi - lo) * rng.gen::<f64>();
        }
    }
    points
}

/// Latin Hypercube Sampling inside `bounds`: every coordinate is stratified
/// into `n_points` equal slices with exactly one point per slice.
pub fn latin_hypercube<R: Rng + ?Sized>(
    bounds: &Bounds,
    n_points: usize,
    rng: &mut R,
) -> Array2<f64> {
    let mut samples = Array2::zeros((n_points, bounds.dim()));
    if n_points == 0 {
        return samples;
    }
    for (dim, [lo, hi]) in bounds.ranges().iter().enumerate() {
        let mut values: Vec<f64> = (0..n_points)
            .map(|i| (i as f64 + rng.gen::<f64>()) / n_points as f64)
            .collect();
        values.shuffle(rng);
        for (i, u) in values.into_iter().enumerate() {
            samples[[i, dim]] = lo + (hi - lo) * u;
        }
    }
    samples
}

/// Draw `n_points` collocation points with the configured strategy.
pub fn sample_points<R: Rng + ?Sized>(
    sampler: CollocationSampler,
    bounds: &Bounds,
    n_points: usize,
    rng: &mut R,
) -> Array2<f64> {
    match sampler {
        CollocationSampler::Uniform => uniform_points(bounds, n_points, rng),
        CollocationSampler::LatinHypercube => latin_hypercube(bounds, n_points, rng),
    }
}
