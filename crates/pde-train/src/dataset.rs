// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Observation Data Set
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Noisy observations of u split into train/test sets, plus the problem
//! domain used to draw collocation points.

use ndarray::{Array1, Array2, Ix1, Ix2, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter, ReadableElement, WriteNpzError};
use pde_math::sampling::Bounds;
use pde_types::error::{PdeError, PdeResult};
use rand::Rng;
use rand_distr::StandardNormal;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// (n_train, 1 + n_spatial), rows `(t, x[, y])`.
    pub train_points: Array2<f64>,
    pub train_values: Array1<f64>,
    pub test_points: Array2<f64>,
    pub test_values: Array1<f64>,
    pub bounds: Bounds,
}

impl DataSet {
    pub fn new(
        train_points: Array2<f64>,
        train_values: Array1<f64>,
        test_points: Array2<f64>,
        test_values: Array1<f64>,
        bounds: Bounds,
    ) -> PdeResult<Self> {
        check_split("train", &train_points, &train_values, &bounds)?;
        check_split("test", &test_points, &test_values, &bounds)?;
        Ok(Self {
            train_points,
            train_values,
            test_points,
            test_values,
            bounds,
        })
    }

    /// Keys: `train_points`, `train_values`, `test_points`, `test_values`,
    /// and `bounds` with shape (coordinates, 2).
    pub fn from_npz<P: AsRef<Path>>(path: P) -> PdeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file).map_err(|e| {
            PdeError::ConfigError(format!("Failed to open npz '{}': {e}", path.display()))
        })?;

        let bounds_arr: Array2<f64> = read_array2(&mut npz, "bounds")?;
        if bounds_arr.ncols() != 2 {
            return Err(PdeError::ShapeMismatch(format!(
                "bounds must have shape (n, 2), got {:?}",
                bounds_arr.dim()
            )));
        }
        let bounds = Bounds::new(
            bounds_arr
                .outer_iter()
                .map(|row| [row[0], row[1]])
                .collect(),
        )?;

        Self::new(
            read_array2(&mut npz, "train_points")?,
            read_array1(&mut npz, "train_values")?,
            read_array2(&mut npz, "test_points")?,
            read_array1(&mut npz, "test_values")?,
            bounds,
        )
    }

    pub fn to_npz<P: AsRef<Path>>(&self, path: P) -> PdeResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let mut npz = NpzWriter::new(file);
        let mut bounds = Array2::zeros((self.bounds.dim(), 2));
        for (i, [lo, hi]) in self.bounds.ranges().iter().enumerate() {
            bounds[[i, 0]] = *lo;
            bounds[[i, 1]] = *hi;
        }

        let write_err = |e: WriteNpzError| {
            PdeError::ConfigError(format!("Failed to write '{}': {e}", path.display()))
        };
        npz.add_array("train_points", &self.train_points)
            .map_err(write_err)?;
        npz.add_array("train_values", &self.train_values)
            .map_err(write_err)?;
        npz.add_array("test_points", &self.test_points)
            .map_err(write_err)?;
        npz.add_array("test_values", &self.test_values)
            .map_err(write_err)?;
        npz.add_array("bounds", &bounds).map_err(write_err)?;
        npz.finish().map_err(write_err)?;
        Ok(())
    }

    /// Coordinates per point, time included.
    pub fn input_dim(&self) -> usize {
        self.bounds.dim()
    }

    /// Add Gaussian noise with standard deviation `proportion * std(train_values)`
    /// to both splits.
    pub fn with_noise<R: Rng + ?Sized>(mut self, proportion: f64, rng: &mut R) -> PdeResult<Self> {
        if !(proportion.is_finite() && proportion >= 0.0) {
            return Err(PdeError::Precondition(format!(
                "noise proportion must be non-negative, got {proportion}"
            )));
        }
        let sigma = proportion * self.train_values.std(0.0);
        if sigma == 0.0 {
            return Ok(self);
        }
        for v in self
            .train_values
            .iter_mut()
            .chain(self.test_values.iter_mut())
        {
            *v += sigma * rng.sample::<f64, _>(StandardNormal);
        }
        Ok(self)
    }
}

/// Tightest box around every row of `points`.
pub fn bounds_from_points(points: &Array2<f64>) -> PdeResult<Bounds> {
    if points.nrows() == 0 {
        return Err(PdeError::Precondition(
            "cannot infer bounds from zero points".to_string(),
        ));
    }
    let ranges = points
        .columns()
        .into_iter()
        .map(|col| {
            let lo = col.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            [lo, hi]
        })
        .collect();
    Bounds::new(ranges)
}

fn check_split(
    name: &str,
    points: &Array2<f64>,
    values: &Array1<f64>,
    bounds: &Bounds,
) -> PdeResult<()> {
    if points.nrows() == 0 {
        return Err(PdeError::ShapeMismatch(format!("{name} split is empty")));
    }
    if points.nrows() != values.len() {
        return Err(PdeError::ShapeMismatch(format!(
            "{name} split has {} points but {} values",
            points.nrows(),
            values.len()
        )));
    }
    if points.ncols() != bounds.dim() {
        return Err(PdeError::ShapeMismatch(format!(
            "{name} points have {} coordinates, bounds have {}",
            points.ncols(),
            bounds.dim()
        )));
    }
    Ok(())
}

fn read_array1<T: ReadableElement>(npz: &mut NpzReader<File>, key: &str) -> PdeResult<Array1<T>> {
    npz.by_name::<OwnedRepr<T>, Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<T>, Ix1>(key))
        .map_err(|e| PdeError::ConfigError(format!("Failed to read {key} from npz: {e}")))
}

fn read_array2<T: ReadableElement>(npz: &mut NpzReader<File>, key: &str) -> PdeResult<Array2<T>> {
    npz.by_name::<OwnedRepr<T>, Ix2>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<T>, Ix2>(key))
        .map_err(|e| PdeError::ConfigError(format!("Failed to read {key} from npz: {e}")))
}
