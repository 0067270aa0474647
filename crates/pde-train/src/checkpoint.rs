// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Checkpoints
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Xi and optimizer state persisted as `.npz`.
//!
//! Keys: `xi` always; `optimizer_kind` (0 = gradient descent, 1 = Adam)
//! whenever optimizer state is present; `adam_step`, `adam_m`, `adam_v` for
//! Adam.

use crate::optimizer::OptimizerState;
use ndarray::{Array1, Ix1, OwnedRepr};
use ndarray_npy::{NpzReader, NpzWriter, ReadableElement, WriteNpzError};
use pde_types::error::{PdeError, PdeResult};
use std::fs::File;
use std::path::Path;

const KIND_GRADIENT_DESCENT: u8 = 0;
const KIND_ADAM: u8 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    pub xi: Array1<f64>,
    pub optimizer: Option<OptimizerState>,
}

impl Checkpoint {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PdeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut npz = NpzWriter::new(file);
        let write_err = |e: WriteNpzError| {
            PdeError::Checkpoint(format!("Failed to write '{}': {e}", path.display()))
        };

        npz.add_array("xi", &self.xi).map_err(write_err)?;
        match &self.optimizer {
            Some(OptimizerState::GradientDescent) => {
                npz.add_array("optimizer_kind", &Array1::from_vec(vec![KIND_GRADIENT_DESCENT]))
                    .map_err(write_err)?;
            }
            Some(OptimizerState::Adam { step, m, v }) => {
                npz.add_array("optimizer_kind", &Array1::from_vec(vec![KIND_ADAM]))
                    .map_err(write_err)?;
                npz.add_array("adam_step", &Array1::from_vec(vec![*step]))
                    .map_err(write_err)?;
                npz.add_array("adam_m", m).map_err(write_err)?;
                npz.add_array("adam_v", v).map_err(write_err)?;
            }
            None => {}
        }
        npz.finish().map_err(write_err)?;
        Ok(())
    }

    /// Load and check that Xi has `total_indices + 1` components.
    pub fn load<P: AsRef<Path>>(path: P, total_indices: usize) -> PdeResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut npz = NpzReader::new(file).map_err(|e| {
            PdeError::Checkpoint(format!("Failed to open npz '{}': {e}", path.display()))
        })?;

        let xi: Array1<f64> = read_array1(&mut npz, "xi")?;
        if xi.len() != total_indices + 1 {
            return Err(PdeError::Checkpoint(format!(
                "saved Xi has {} components, library needs {}",
                xi.len(),
                total_indices + 1
            )));
        }

        let names = npz
            .names()
            .map_err(|e| PdeError::Checkpoint(format!("Failed to list npz entries: {e}")))?;
        let kind = if has_array(&names, "optimizer_kind") {
            let kind: Array1<u8> = read_array1(&mut npz, "optimizer_kind")?;
            Some(kind.get(0).copied().ok_or_else(|| {
                PdeError::Checkpoint("optimizer_kind is empty".to_string())
            })?)
        } else if has_array(&names, "adam_step") {
            Some(KIND_ADAM)
        } else {
            None
        };

        let optimizer = match kind {
            None => None,
            Some(KIND_GRADIENT_DESCENT) => Some(OptimizerState::GradientDescent),
            Some(KIND_ADAM) => Some(read_adam(&mut npz, xi.len())?),
            Some(other) => {
                return Err(PdeError::Checkpoint(format!(
                    "unknown optimizer_kind {other}"
                )))
            }
        };

        Ok(Self { xi, optimizer })
    }
}

/// Moments are either empty (no step taken yet) or one per Xi component.
fn read_adam(npz: &mut NpzReader<File>, n_params: usize) -> PdeResult<OptimizerState> {
    let step: Array1<u64> = read_array1(npz, "adam_step")?;
    let step = step
        .get(0)
        .copied()
        .ok_or_else(|| PdeError::Checkpoint("adam_step is empty".to_string()))?;
    let m: Array1<f64> = read_array1(npz, "adam_m")?;
    let v: Array1<f64> = read_array1(npz, "adam_v")?;
    for (name, moment) in [("adam_m", &m), ("adam_v", &v)] {
        if !moment.is_empty() && moment.len() != n_params {
            return Err(PdeError::Checkpoint(format!(
                "{name} has {} components, Xi has {n_params}",
                moment.len()
            )));
        }
    }
    if m.len() != v.len() {
        return Err(PdeError::Checkpoint(format!(
            "Adam moments disagree in length: m={}, v={}",
            m.len(),
            v.len()
        )));
    }
    Ok(OptimizerState::Adam { step, m, v })
}

fn has_array(names: &[String], key: &str) -> bool {
    let with_ext = format!("{key}.npy");
    names.iter().any(|n| n == key || *n == with_ext)
}

fn read_array1<T: ReadableElement>(
    npz: &mut NpzReader<File>,
    key: &str,
) -> PdeResult<Array1<T>> {
    npz.by_name::<OwnedRepr<T>, Ix1>(&format!("{key}.npy"))
        .or_else(|_| npz.by_name::<OwnedRepr<T>, Ix1>(key))
        .map_err(|e| PdeError::Checkpoint(format!("Failed to read {key} from npz: {e}")))
}
