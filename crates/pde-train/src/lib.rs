// ─────────────────────────────────────────────────────────────────────
// SCPN PDE Learn — Training
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Data sets, optimizers, checkpoints and the epoch loop that fits Xi.

pub mod checkpoint;
pub mod dataset;
pub mod optimizer;
pub mod trainer;
